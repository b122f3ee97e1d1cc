use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::record::ResultRecord;
use crate::error::{FavlensError, Result};

/// Console lines for one record
pub fn write_record<W: Write>(out: &mut W, record: &ResultRecord) -> Result<()> {
    writeln!(out, "Favicon Hash: {}", record.favhash)?;
    if let Some(conn) = &record.connection {
        writeln!(out, "Mask-IP: {}", conn.ip)?;
        writeln!(out, "Mask-ISP: {}", conn.isp.as_deref().unwrap_or("unknown"))?;
    }
    for ip in &record.real_ips {
        writeln!(out, "Real-IP: {ip}")?;
    }
    Ok(())
}

/// Writes all records to `path` as a pretty-printed JSON array
pub fn write_json<P: AsRef<Path>>(path: P, records: &[ResultRecord]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| FavlensError::file(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)
        .map_err(|e| FavlensError::Io(std::io::Error::other(e)))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprinting::Fingerprint;
    use crate::lens::ConnectionInfo;
    use crate::source::SourceKind;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;

    fn url_record() -> std::result::Result<ResultRecord, Box<dyn std::error::Error + Send + Sync>> {
        Ok(ResultRecord {
            favhash: Fingerprint(-216455174),
            source: "https://example.com/favicon.ico".to_string(),
            kind: SourceKind::Url,
            connection: Some(ConnectionInfo {
                ip: "104.16.1.1".parse()?,
                isp: Some("CLOUDFLARENET".to_string()),
            }),
            real_ips: vec!["198.51.100.7".to_string(), "198.51.100.7".to_string()],
        })
    }

    #[test]
    fn console_lines_for_network_source() -> TestResult {
        let mut out = Vec::new();
        write_record(&mut out, &url_record()?)?;
        assert_eq!(
            String::from_utf8(out)?,
            "Favicon Hash: -216455174\nMask-IP: 104.16.1.1\nMask-ISP: CLOUDFLARENET\n\
             Real-IP: 198.51.100.7\nReal-IP: 198.51.100.7\n"
        );
        Ok(())
    }

    #[test]
    fn console_lines_for_file_source() -> TestResult {
        let record = ResultRecord {
            favhash: Fingerprint(7),
            source: "favicon.ico".to_string(),
            kind: SourceKind::File,
            connection: None,
            real_ips: vec![],
        };
        let mut out = Vec::new();
        write_record(&mut out, &record)?;
        assert_eq!(String::from_utf8(out)?, "Favicon Hash: 7\n");
        Ok(())
    }

    #[test]
    fn json_output_fields() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.json");
        write_json(&path, &[url_record()?])?;

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        let first = &value[0];
        assert_eq!(first["favhash"], -216455174);
        assert_eq!(first["kind"], "url");
        assert_eq!(first["mask_ip"], "104.16.1.1");
        assert_eq!(first["mask_isp"], "CLOUDFLARENET");
        assert_eq!(first["real_ips"].as_array().map(Vec::len), Some(2));
        Ok(())
    }
}
