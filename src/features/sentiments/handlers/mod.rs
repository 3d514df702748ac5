pub mod sentiment_handler;

pub use sentiment_handler::{
    __path_create_sentiment, __path_list_sentiments, create_sentiment, list_sentiments,
};
