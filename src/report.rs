use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::Writer;

pub const REPORT_FILE_NAME: &str = "GooglePhotosMetaFix_Report.csv";

/// Run-wide accumulator: the open CSV report plus the running counters.
/// Created once at run start, passed through the processing loop, and
/// finished (flushed) at run end. Rows are append-only.
pub struct RunReport {
    writer: Writer<File>,
    path: PathBuf,
    success: u64,
    failure: u64,
}

/// Success/failure totals returned by [`RunReport::finish`].
pub struct RunSummary {
    pub success: u64,
    pub failure: u64,
    pub report_path: PathBuf,
}

impl RunReport {
    pub fn create(destination: &Path) -> Result<Self> {
        let path = destination.join(REPORT_FILE_NAME);
        let file = File::create(&path)
            .with_context(|| format!("创建报告文件 {} 失败", path.display()))?;

        let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(file);
        writer.write_record(["File Name", "Status", "Error Message"])?;

        Ok(Self {
            writer,
            path,
            success: 0,
            failure: 0,
        })
    }

    pub fn record_success(&mut self, file_name: &str) -> Result<()> {
        self.success += 1;
        self.writer.write_record([file_name, "Success", ""])?;
        info!(
            "{}: 处理成功 ({} ok / {} failed)",
            file_name, self.success, self.failure
        );
        Ok(())
    }

    pub fn record_failure(&mut self, file_name: &str, detail: &str) -> Result<()> {
        self.failure += 1;
        self.writer.write_record([file_name, "Failure", detail])?;
        warn!(
            "{}: {} ({} ok / {} failed)",
            file_name, detail, self.success, self.failure
        );
        Ok(())
    }

    pub fn finish(mut self) -> Result<RunSummary> {
        self.writer.flush().context("flush report failed")?;
        Ok(RunSummary {
            success: self.success,
            failure: self.failure,
            report_path: self.path,
        })
    }
}
