pub mod match_request;
pub mod match_response;

pub use match_request::{CandidateMatchRequest, ProjectMatchRequest};
pub use match_response::MatchBatchResponse;
