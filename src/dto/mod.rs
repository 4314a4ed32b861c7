pub mod assessment_dto;
pub mod candidate_dto;
pub mod job_dto;
pub mod note_dto;
pub mod pagination;
pub mod stats_dto;
