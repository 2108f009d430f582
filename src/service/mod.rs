pub mod reading_time;
