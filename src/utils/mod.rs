pub mod answers;
pub mod form;
pub mod mentions;
pub mod ordering;
pub mod slug;
pub mod time;
pub mod validation;
pub mod visibility;
