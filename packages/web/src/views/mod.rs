mod landing;
pub use landing::Landing;

mod scan;
pub use scan::Scan;

mod history;
pub use history::MoodHistory;

mod not_found;
pub use not_found::NotFound;
