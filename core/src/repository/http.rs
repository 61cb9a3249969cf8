use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{multipart::Form, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::model::brand::{Brand, BrandUpdate, NewBrand};
use crate::model::selection::{Selection, Timeframe};
use crate::model::sheet::{SheetEntry, SheetUpload};
use crate::repository::error::ApiError;
use crate::repository::traits::{BrandRepository, SheetRepository};

const BRANDS_PATH: &str = "dashboard/brands";
const SHEETS_PATH: &str = "sheet";
const SHEETS_FILTER_PATH: &str = "sheet/filter";
const SHEETS_UPLOAD_PATH: &str = "sheet/add";

/// Talks to the dashboard REST backend.
#[derive(Clone)]
pub struct HttpDashboardRepository {
    client: Client,
    base_url: String,
}

impl HttpDashboardRepository {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Uses a preconfigured client, e.g. one with proxies disabled.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn send(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        if status.is_success() {
            Ok(body)
        } else {
            warn!(status = status.as_u16(), "backend rejected request");
            Err(ApiError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, ?query, "GET");
        let body = self.send(self.client.get(&url).query(query))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl BrandRepository for HttpDashboardRepository {
    fn list_brands(&self) -> Result<Vec<Brand>> {
        Ok(self.get_json(BRANDS_PATH, &[])?)
    }

    fn create_brand(&self, brand: &NewBrand) -> Result<()> {
        let url = self.url(BRANDS_PATH);
        info!(name = %brand.brand_name, "creating brand");
        self.send(self.client.post(&url).json(brand))?;
        Ok(())
    }

    fn update_brand(&self, id: &str, update: &BrandUpdate) -> Result<()> {
        let url = self.url(&format!("{}/{}", BRANDS_PATH, id));
        info!(%id, name = %update.name, "renaming brand");
        self.send(self.client.patch(&url).json(update))?;
        Ok(())
    }

    fn delete_brand(&self, id: &str) -> Result<()> {
        let url = self.url(&format!("{}/{}", BRANDS_PATH, id));
        info!(%id, "deleting brand");
        self.send(self.client.delete(&url))?;
        Ok(())
    }
}

impl SheetRepository for HttpDashboardRepository {
    fn find_sheets(&self, selection: &Selection) -> Result<Vec<SheetEntry>> {
        let path = match selection.timeframe {
            Timeframe::Latest => SHEETS_PATH,
            Timeframe::Monthly { .. } => SHEETS_FILTER_PATH,
        };
        Ok(self.get_json(path, &selection.query())?)
    }

    fn upload_sheets(&self, upload: &SheetUpload) -> Result<()> {
        let form = Form::new()
            .file("file1", &upload.regional_manager_file)
            .map_err(ApiError::from)?
            .file("file2", &upload.sales_data_file)
            .map_err(ApiError::from)?
            .text("BrandId", upload.brand_id.clone())
            .text("BrandName", upload.brand_name.clone())
            .text("managerType", upload.manager_type.to_string())
            .text("Datadate", upload.data_date.format("%Y-%m-%d").to_string());

        let url = self.url(SHEETS_UPLOAD_PATH);
        info!(
            brand = %upload.brand_id,
            manager = %upload.manager_type,
            date = %upload.data_date,
            "uploading sheets"
        );
        self.send(self.client.post(&url).multipart(form))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::selection::ManagerType;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::{self, JoinHandle};

    /// Reads one full request: the head, then a `Content-Length` or chunked body.
    fn read_request(stream: &mut TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 8192];
        loop {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);

            let text = String::from_utf8_lossy(&data).to_string();
            let Some(head_end) = text.find("\r\n\r\n") else {
                continue;
            };
            let head = text[..head_end].to_ascii_lowercase();
            let content_length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok());
            let body_len = data.len() - (head_end + 4);
            let done = match content_length {
                Some(len) => body_len >= len,
                None if head.contains("transfer-encoding: chunked") => {
                    text.ends_with("0\r\n\r\n")
                }
                None => true,
            };
            if done {
                break;
            }
        }
        String::from_utf8_lossy(&data).to_string()
    }

    /// Answers a single request with `status` and `body`, returning the raw request.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            request
        });
        (url, handle)
    }

    fn repo_for(url: &str) -> HttpDashboardRepository {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpDashboardRepository::with_client(client, &format!("{}/", url))
    }

    #[test]
    fn test_new_uses_settings() {
        let settings = Settings {
            api_base_url: "http://dashboard.local/api/".to_string(),
            ..Settings::default()
        };
        let repo = HttpDashboardRepository::new(&settings).unwrap();
        assert_eq!(repo.base_url(), "http://dashboard.local/api");
    }

    #[test]
    fn test_url_joining_strips_slashes() {
        let repo = repo_for("http://localhost:8080");
        assert_eq!(repo.base_url(), "http://localhost:8080");
        assert_eq!(repo.url("/sheet/filter"), "http://localhost:8080/sheet/filter");
    }

    #[test]
    fn test_list_brands_decodes_body() {
        let body = r#"[{"brandId":"1","brandName":"Indaflo G"},
            {"brandId":2,"brandName":"Foracort"}]"#;
        let (url, handle) = serve_once("200 OK", body);
        let brands = repo_for(&url).list_brands().unwrap();
        let request = handle.join().unwrap();

        assert!(request.starts_with("GET /dashboard/brands "));
        assert_eq!(brands.len(), 2);
        assert_eq!(brands[1].brand_id, "2");
    }

    #[test]
    fn test_monthly_selection_hits_filter_endpoint() {
        let (url, handle) = serve_once("200 OK", "[]");
        let selection =
            Selection::latest("b1", ManagerType::ZBM).with_timeframe(Timeframe::Monthly {
                year: 2025,
                month: chrono::Month::September,
                week: None,
            });
        let sheets = repo_for(&url).find_sheets(&selection).unwrap();
        let request = handle.join().unwrap();

        assert!(sheets.is_empty());
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /sheet/filter?"));
        assert!(request_line.contains("managerType=ZBM"));
        assert!(request_line.contains("month=September"));
        assert!(request_line.contains("brandId=b1"));
        assert!(!request_line.contains("week="));
    }

    #[test]
    fn test_latest_selection_hits_plain_listing() {
        let body = r#"[{"sheetId":"s1","Datadate":"2025-09-30","sheetData":[],
            "brandId":"b1","managerType":"RBM"}]"#;
        let (url, handle) = serve_once("200 OK", body);
        let selection = Selection::latest("b1", ManagerType::RBM);
        let sheets = repo_for(&url).find_sheets(&selection).unwrap();
        let request = handle.join().unwrap();

        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].id, "s1");
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /sheet?"));
        assert!(request_line.contains("managerType=RBM"));
        assert!(request_line.contains("brandId=b1"));
        assert!(!request_line.contains("month="));
    }

    #[test]
    fn test_upload_sends_multipart_fields() {
        let dir = tempfile::tempdir().unwrap();
        let rm_file = dir.path().join("rm.xlsx");
        let sales_file = dir.path().join("sales.xlsx");
        std::fs::write(&rm_file, b"rm-bytes").unwrap();
        std::fs::write(&sales_file, b"sales-bytes").unwrap();

        let upload = SheetUpload {
            brand_id: "b1".to_string(),
            brand_name: "Indaflo G".to_string(),
            manager_type: ManagerType::ZBM,
            data_date: chrono::NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
            regional_manager_file: rm_file,
            sales_data_file: sales_file,
        };

        let (url, handle) = serve_once("201 Created", "{}");
        repo_for(&url).upload_sheets(&upload).unwrap();
        let request = handle.join().unwrap();

        assert!(request.starts_with("POST /sheet/add "));
        assert!(request.to_ascii_lowercase().contains("content-type: multipart/form-data"));
        for field in ["file1", "file2", "BrandId", "BrandName", "managerType", "Datadate"] {
            assert!(request.contains(&format!("name=\"{}\"", field)), "missing field {}", field);
        }
        assert!(request.contains("rm-bytes"));
        assert!(request.contains("sales-bytes"));
        assert!(request.contains("Indaflo G"));
        assert!(request.contains("ZBM"));
        assert!(request.contains("2025-09-30"));
    }

    #[test]
    fn test_error_status_is_reported() {
        let (url, handle) = serve_once("500 Internal Server Error", r#"{"message":"boom"}"#);
        let err = repo_for(&url).delete_brand("9").unwrap_err();
        handle.join().unwrap();

        let api_err = err.downcast_ref::<ApiError>().unwrap();
        assert!(matches!(api_err, ApiError::Status { status: 500, .. }));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_undecodable_body() {
        let (url, handle) = serve_once("200 OK", "not json");
        let err = repo_for(&url).list_brands().unwrap_err();
        handle.join().unwrap();
        assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::Decode(_))));
    }
}
