mod sentiment;

pub use sentiment::SentimentRecord;
