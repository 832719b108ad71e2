mod landing;
pub use landing::LandingView;

mod scan;
pub use scan::ScanView;

mod history;
pub use history::HistoryView;
