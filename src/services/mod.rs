pub mod ai_service;
pub mod evaluation_service;
pub mod feedback;
pub mod speech_service;
