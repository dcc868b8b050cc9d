pub mod grade;
pub mod grade_sheet;
pub mod init;
pub mod units;
pub mod validate;
