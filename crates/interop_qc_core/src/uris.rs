use url::Url;

use crate::contract::ValidationError;

/// Append the InterOp subdirectory to a primary-data output URI.
pub fn interop_directory(primary_data_output_uri: &str) -> String {
    format!("{primary_data_output_uri}InterOp/")
}

/// Append the BCLConvert Reports subdirectory to a primary-data output URI.
pub fn bclconvert_reports_directory(primary_data_output_uri: &str) -> String {
    format!("{primary_data_output_uri}Reports/")
}

pub fn workflow_output_uri(output_uri_prefix: &str, portal_run_id: &str) -> String {
    format!("{output_uri_prefix}{portal_run_id}/")
}

pub fn workflow_logs_uri(logs_uri_prefix: &str, portal_run_id: &str) -> String {
    format!("{logs_uri_prefix}{portal_run_id}/")
}

pub fn interop_summary_dir(output_uri: &str) -> String {
    format!("{output_uri}interop_summary_files/")
}

pub fn multiqc_output_dir(output_uri: &str) -> String {
    format!("{output_uri}multiqc/")
}

pub fn multiqc_html_report_uri(output_uri: &str, instrument_run_id: &str) -> String {
    format!("{output_uri}multiqc/{instrument_run_id}_multiqc_report.html")
}

pub fn multiqc_qlims_csv_uri(output_uri: &str, instrument_run_id: &str) -> String {
    format!("{output_uri}{instrument_run_id}_multiqc_bclconvert_summary_qlims.csv")
}

/// URI of the directory containing an S3 object, with a trailing slash.
pub fn parent_directory_uri(s3_uri: &str) -> Result<String, ValidationError> {
    let (bucket, path) = split_s3_uri(s3_uri)?;
    let trimmed = path.trim_end_matches('/');
    let parent = match trimmed.rfind('/') {
        Some(index) => &trimmed[..index],
        None => "",
    };
    Ok(format!("s3://{bucket}{parent}/"))
}

/// Final path segment of an S3 object URI.
pub fn object_name(s3_uri: &str) -> Result<String, ValidationError> {
    let (_, path) = split_s3_uri(s3_uri)?;
    let trimmed = path.trim_end_matches('/');
    let name = match trimmed.rfind('/') {
        Some(index) => &trimmed[index + 1..],
        None => trimmed,
    };
    if name.is_empty() {
        return Err(ValidationError::new(format!(
            "S3 URI '{s3_uri}' has no object name"
        )));
    }
    Ok(name.to_string())
}

fn split_s3_uri(s3_uri: &str) -> Result<(String, String), ValidationError> {
    let parsed = Url::parse(s3_uri)
        .map_err(|error| ValidationError::new(format!("invalid S3 URI '{s3_uri}': {error}")))?;
    if parsed.scheme() != "s3" {
        return Err(ValidationError::new(format!(
            "expected an s3:// URI, got '{s3_uri}'"
        )));
    }
    let bucket = parsed
        .host_str()
        .ok_or_else(|| ValidationError::new(format!("S3 URI '{s3_uri}' has no bucket")))?;
    Ok((bucket.to_string(), parsed.path().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_primary_data_subdirectories() {
        let primary = "s3://cache/byob-icav2/development/primary/20231010_pi1-07_0329_A222N7LTD3/202504179cac7411/";

        assert_eq!(
            interop_directory(primary),
            format!("{primary}InterOp/")
        );
        assert_eq!(
            bclconvert_reports_directory(primary),
            format!("{primary}Reports/")
        );
    }

    #[test]
    fn builds_engine_parameter_uris_from_prefixes() {
        assert_eq!(
            workflow_output_uri("s3://cache/analysis/bclconvert-interop-qc/", "20250417abcd1234"),
            "s3://cache/analysis/bclconvert-interop-qc/20250417abcd1234/"
        );
        assert_eq!(
            workflow_logs_uri("s3://cache/logs/bclconvert-interop-qc/", "20250417abcd1234"),
            "s3://cache/logs/bclconvert-interop-qc/20250417abcd1234/"
        );
    }

    #[test]
    fn builds_multiqc_output_set() {
        let output_uri = "s3://cache/analysis/bclconvert-interop-qc/20250417abcd1234/";
        let run = "20231010_pi1-07_0329_A222N7LTD3";

        assert_eq!(
            interop_summary_dir(output_uri),
            format!("{output_uri}interop_summary_files/")
        );
        assert_eq!(multiqc_output_dir(output_uri), format!("{output_uri}multiqc/"));
        assert_eq!(
            multiqc_html_report_uri(output_uri, run),
            format!("{output_uri}multiqc/{run}_multiqc_report.html")
        );
        assert_eq!(
            multiqc_qlims_csv_uri(output_uri, run),
            format!("{output_uri}{run}_multiqc_bclconvert_summary_qlims.csv")
        );
    }

    #[test]
    fn splits_object_uri_into_parent_and_name() {
        let uri = "s3://bucket/multiqc/parquet/L2301197.parquet";

        assert_eq!(
            parent_directory_uri(uri).expect("uri should parse"),
            "s3://bucket/multiqc/parquet/"
        );
        assert_eq!(object_name(uri).expect("uri should parse"), "L2301197.parquet");
    }

    #[test]
    fn parent_of_top_level_object_is_bucket_root() {
        assert_eq!(
            parent_directory_uri("s3://bucket/file.parquet").expect("uri should parse"),
            "s3://bucket/"
        );
    }

    #[test]
    fn rejects_non_s3_uris() {
        let error = parent_directory_uri("https://bucket/file.parquet")
            .expect_err("https uri should be rejected");
        assert!(error.message().contains("expected an s3:// URI"));
    }
}
