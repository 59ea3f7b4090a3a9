pub mod feedback_dto;
pub mod question_dto;
pub mod speech_dto;
