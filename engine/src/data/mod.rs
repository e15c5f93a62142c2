// Report loading: CSV parsing and the load-once cache.
pub mod csv_parser;
pub mod report_cache;
