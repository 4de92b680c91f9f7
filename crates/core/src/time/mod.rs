pub mod report_date;
