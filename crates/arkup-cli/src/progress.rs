//! Progress indicators for downloads
//!
//! Byte-level progress is advisory only; it never participates in the
//! pipeline's correctness contract.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a byte-progress bar for a download
///
/// When the content length is unknown the bar degrades to a spinner with a
/// running byte count.
pub fn download_bar(total_bytes: Option<u64>, name: &str) -> ProgressBar {
    let pb = match total_bytes {
        Some(total) => {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .expect("Invalid progress bar template")
                    .progress_chars("=>-"),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} {bytes}")
                    .expect("Invalid spinner template"),
            );
            pb
        }
    };
    pb.set_message(format!("Downloading {}", name));
    pb
}

/// Format bytes into a human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1048576), "1.00 MB");
    }

    #[test]
    fn test_download_bar_with_length() {
        let pb = download_bar(Some(2048), "a.mp4");
        assert_eq!(pb.length(), Some(2048));
    }

    #[test]
    fn test_download_bar_without_length() {
        let pb = download_bar(None, "a.mp4");
        assert!(!pb.is_finished());
        pb.finish();
    }
}
