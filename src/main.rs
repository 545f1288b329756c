use job_data::{Config, CsvSource, JobDataError, JobTable};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), JobDataError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = Config::from_env();
    if let Some(path) = env::args_os().nth(1) {
        config.data_file = PathBuf::from(path);
    }

    let jobs = JobTable::new(CsvSource::new(config.data_file));
    let header = jobs.header()?;
    let records = jobs.find_all_records()?;
    info!(columns = ?header, rows = records.len(), "ready");

    Ok(())
}
