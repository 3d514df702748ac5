mod export_dto;

pub use export_dto::{
    DashboardCounts, ExportDocument, GpsPreviewRow, SentimentPreviewRow, TotalRecords,
    VlogIdsQuery, VlogListRow,
};
