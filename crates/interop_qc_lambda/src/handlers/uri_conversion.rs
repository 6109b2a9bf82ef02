use crate::runtime::uris;
use serde::{Deserialize, Serialize};

use crate::adapters::project_data::{icav2_uri, ProjectDataApi, ProjectDataError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UriConversionEvent {
    pub s3_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UriConversionResponse {
    pub icav2_uri: String,
}

/// Convert an S3 URI to its ICAv2 form. An object that does not exist yet
/// resolves through its parent folder (created on demand) plus the object
/// name, so downstream writers receive a valid destination.
pub fn handle_uri_conversion(
    event: UriConversionEvent,
    project_data_api: &dyn ProjectDataApi,
) -> Result<UriConversionResponse, String> {
    match project_data_api.resolve_uri(&event.s3_uri) {
        Ok(data) => Ok(UriConversionResponse {
            icav2_uri: icav2_uri(&data),
        }),
        Err(ProjectDataError::NotFound) => {
            let parent_uri = uris::parent_directory_uri(&event.s3_uri)
                .map_err(|error| error.message().to_string())?;
            let name =
                uris::object_name(&event.s3_uri).map_err(|error| error.message().to_string())?;
            let parent = project_data_api
                .resolve_or_create_folder(&parent_uri)
                .map_err(|error| error.to_string())?;
            Ok(UriConversionResponse {
                icav2_uri: format!("{}{name}", icav2_uri(&parent)),
            })
        }
        Err(error) => Err(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use crate::adapters::project_data::ProjectData;

    use super::*;

    struct FixtureProjectDataApi {
        resolved: Option<ProjectData>,
        created_folders: Mutex<Vec<String>>,
    }

    impl ProjectDataApi for FixtureProjectDataApi {
        fn resolve_uri(&self, _s3_uri: &str) -> Result<ProjectData, ProjectDataError> {
            self.resolved.clone().ok_or(ProjectDataError::NotFound)
        }

        fn resolve_or_create_folder(
            &self,
            s3_folder_uri: &str,
        ) -> Result<ProjectData, ProjectDataError> {
            self.created_folders
                .lock()
                .expect("poisoned mutex")
                .push(s3_folder_uri.to_string());
            Ok(ProjectData {
                project_id: "ea19a3f5".to_string(),
                data_id: "fol.created".to_string(),
                path: "/analysis/bclconvert-interop-qc/20250417abcd1234/".to_string(),
            })
        }
    }

    #[test]
    fn existing_object_converts_directly() {
        let api = FixtureProjectDataApi {
            resolved: Some(ProjectData {
                project_id: "ea19a3f5".to_string(),
                data_id: "fil.existing".to_string(),
                path: "/analysis/bclconvert-interop-qc/20250417abcd1234/multiqc.parquet"
                    .to_string(),
            }),
            created_folders: Mutex::new(Vec::new()),
        };

        let response = handle_uri_conversion(
            UriConversionEvent {
                s3_uri: "s3://cache/analysis/bclconvert-interop-qc/20250417abcd1234/multiqc.parquet"
                    .to_string(),
            },
            &api,
        )
        .expect("handler should pass");

        assert_eq!(
            response.icav2_uri,
            "icav2://ea19a3f5/analysis/bclconvert-interop-qc/20250417abcd1234/multiqc.parquet"
        );
        assert!(api.created_folders.lock().expect("poisoned mutex").is_empty());
    }

    #[test]
    fn missing_object_resolves_through_created_parent() {
        let api = FixtureProjectDataApi {
            resolved: None,
            created_folders: Mutex::new(Vec::new()),
        };

        let response = handle_uri_conversion(
            UriConversionEvent {
                s3_uri: "s3://cache/analysis/bclconvert-interop-qc/20250417abcd1234/multiqc.parquet"
                    .to_string(),
            },
            &api,
        )
        .expect("handler should pass");

        assert_eq!(
            response.icav2_uri,
            "icav2://ea19a3f5/analysis/bclconvert-interop-qc/20250417abcd1234/multiqc.parquet"
        );
        assert_eq!(
            api.created_folders.lock().expect("poisoned mutex").as_slice(),
            ["s3://cache/analysis/bclconvert-interop-qc/20250417abcd1234/"]
        );
    }
}
