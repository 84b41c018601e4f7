//! Result files
//!
//! `ip.txt` holds a dated header followed by every live manifest url;
//! `tvlist.txt` holds one `name,url` line per unique channel.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::config::OutputConfig;
use crate::errors::{AppError, AppResult};
use crate::models::Channel;

pub struct ScanOutputWriter {
    ip_list_path: PathBuf,
    channel_list_path: PathBuf,
}

impl ScanOutputWriter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            ip_list_path: config.ip_list_path.clone(),
            channel_list_path: config.channel_list_path.clone(),
        }
    }

    pub fn ip_list_path(&self) -> &Path {
        &self.ip_list_path
    }

    pub fn channel_list_path(&self) -> &Path {
        &self.channel_list_path
    }

    /// Header line `<YYYY-MM-DD>更新`, then one url per line
    pub async fn write_live_hosts(&self, date: NaiveDate, live_urls: &[String]) -> AppResult<()> {
        let mut contents = format!("{}更新\n", date.format("%Y-%m-%d"));
        for url in live_urls {
            contents.push_str(url);
            contents.push('\n');
        }
        write_file(&self.ip_list_path, contents).await?;
        info!(
            "Wrote {} live urls to {}",
            live_urls.len(),
            self.ip_list_path.display()
        );
        Ok(())
    }

    /// One `name,url` line per channel, no header
    pub async fn write_channels(&self, channels: &[Channel]) -> AppResult<()> {
        let contents: String = channels
            .iter()
            .map(|channel| format!("{channel}\n"))
            .collect();
        write_file(&self.channel_list_path, contents).await?;
        info!(
            "Wrote {} channels to {}",
            channels.len(),
            self.channel_list_path.display()
        );
        Ok(())
    }
}

async fn write_file(path: &Path, contents: String) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::output(path, e))?;
    }
    fs::write(path, contents)
        .await
        .map_err(|e| AppError::output(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn writer(dir: &TempDir) -> ScanOutputWriter {
        ScanOutputWriter::new(&OutputConfig {
            ip_list_path: dir.path().join("out/ip.txt"),
            channel_list_path: dir.path().join("out/tvlist.txt"),
        })
    }

    #[tokio::test]
    async fn test_ip_list_has_dated_header() {
        let dir = TempDir::new().unwrap();
        let writer = writer(&dir);
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let urls = vec![
            "http://10.0.0.37:9901/iptv/live/1000.json?key=txiptv".to_string(),
            "http://10.0.0.2:9901/iptv/live/1000.json?key=txiptv".to_string(),
        ];

        writer.write_live_hosts(date, &urls).await.unwrap();

        let written = std::fs::read_to_string(writer.ip_list_path()).unwrap();
        assert_eq!(
            written,
            "2026-10-18更新\n\
             http://10.0.0.37:9901/iptv/live/1000.json?key=txiptv\n\
             http://10.0.0.2:9901/iptv/live/1000.json?key=txiptv\n"
        );
    }

    #[tokio::test]
    async fn test_empty_results_still_written() {
        let dir = TempDir::new().unwrap();
        let writer = writer(&dir);
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();

        writer.write_live_hosts(date, &[]).await.unwrap();
        writer.write_channels(&[]).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(writer.ip_list_path()).unwrap(),
            "2026-01-02更新\n"
        );
        assert_eq!(
            std::fs::read_to_string(writer.channel_list_path()).unwrap(),
            ""
        );
    }

    #[tokio::test]
    async fn test_channel_lines() {
        let dir = TempDir::new().unwrap();
        let writer = writer(&dir);
        let channels = vec![
            Channel::new("CCTV1", "http://10.0.0.1:9901/live/1.m3u8"),
            Channel::new("CCTV5+", "udp://239.0.0.5:5000"),
        ];

        writer.write_channels(&channels).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(writer.channel_list_path()).unwrap(),
            "CCTV1,http://10.0.0.1:9901/live/1.m3u8\nCCTV5+,udp://239.0.0.5:5000\n"
        );
    }

    #[tokio::test]
    async fn test_unwritable_path_is_output_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let writer = ScanOutputWriter::new(&OutputConfig {
            ip_list_path: blocker.join("ip.txt"),
            channel_list_path: blocker.join("tvlist.txt"),
        });

        let err = writer.write_channels(&[]).await.unwrap_err();
        assert!(matches!(err, AppError::Output { .. }));
    }
}
