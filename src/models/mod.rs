pub mod assessment;
pub mod candidate;
pub mod job;
pub mod note;
pub mod team_member;
pub mod timeline;
