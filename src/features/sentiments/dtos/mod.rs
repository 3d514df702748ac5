mod sentiment_dto;

pub use sentiment_dto::{CreateSentimentDto, SentimentResponseDto};
