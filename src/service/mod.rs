pub mod calendar_service;
pub mod command;
pub mod event_message_service;
pub mod event_query;
pub mod reference_cache;
