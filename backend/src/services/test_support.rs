//! Fixtures shared by the endpoint tests.

use crate::config::Config;
use crate::db::report_mapper::ReportMapper;
use crate::db::template_mapper::TemplateMapper;
use crate::platform::account::AccountId;
use crate::platform::UploadedFile;
use crate::services::{self, media::collect_files};
use crate::state::AppState;
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};
use clap::Parser;
use common::model::permission::{AccountPermission, PermissionState, PermissionType};
use common::model::reference::Ref;
use common::model::report::Report;
use common::model::template::Template;
use common::MODULE_NAME;
use std::ffi::OsString;
use tempfile::TempDir;

const BOUNDARY: &str = "helper-test-boundary";

/// Account that owns the fixtures created by [`store_template`] and [`store_report`].
const FIXTURE_ACCOUNT: AccountId = AccountId(1000);

/// Application state over a throwaway database and media root.
pub struct TestApp {
    pub state: web::Data<AppState>,
    _dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let args: Vec<OsString> = vec![
            "helper-server".into(),
            "--database".into(),
            dir.path().join("helper.sqlite").into(),
            "--media-root".into(),
            dir.path().join("media").into(),
            "--fonts-dir".into(),
            dir.path().join("fonts").into(),
        ];
        let state = AppState::from_config(Config::parse_from(args)).expect("Failed to set up state");
        Self {
            state: web::Data::new(state),
            _dir: dir,
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<BoxBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.state.clone())
            .configure(services::configure)
    }
}

pub fn grant(
    state: &AppState,
    account: i64,
    permission: PermissionType,
    category: PermissionState,
    element: Option<i64>,
) {
    state
        .accounts
        .grant(&AccountPermission {
            account,
            unit: state.config.org_id,
            app: Some(state.config.app_name.clone()),
            module: MODULE_NAME.to_string(),
            from: MODULE_NAME.to_string(),
            category: Some(category),
            element,
            permission,
        })
        .expect("Failed to grant permission");
}

/// A `multipart/form-data` body with the given text fields and files.
pub fn multipart(fields: &[(&str, &str)], files: &[(&str, &[u8])]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    for (file_name, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}

fn uploads(files: &[(&str, &str)]) -> Vec<UploadedFile> {
    files
        .iter()
        .map(|(file_name, content)| UploadedFile {
            file_name: file_name.to_string(),
            bytes: content.as_bytes().to_vec(),
        })
        .collect()
}

/// Stores a template whose collection holds `files`. Returns its id.
pub fn store_template(
    state: &AppState,
    name: &str,
    standalone: bool,
    files: &[(&str, &str)],
) -> i64 {
    let collection = collect_files(state, FIXTURE_ACCOUNT, name, "", &uploads(files), &[])
        .expect("Failed to collect template files");

    let mut template = Template::new();
    template.name = name.to_string();
    template.is_standalone = standalone;
    template.source = Ref::Unresolved(collection.id);
    template.created_by = Ref::Unresolved(FIXTURE_ACCOUNT.0);

    let conn = state.db.connect().unwrap();
    TemplateMapper::new(&conn, &state.schema)
        .create(&mut template)
        .expect("Failed to store template")
}

/// Stores a report of `template` whose collection holds `files`. Returns its id.
pub fn store_report(state: &AppState, template: i64, title: &str, files: &[(&str, &str)]) -> i64 {
    let collection = collect_files(state, FIXTURE_ACCOUNT, title, "", &uploads(files), &[])
        .expect("Failed to collect report files");

    let mut report = Report::new();
    report.title = title.to_string();
    report.template = Ref::Unresolved(template);
    report.source = Ref::Unresolved(collection.id);
    report.created_by = Ref::Unresolved(FIXTURE_ACCOUNT.0);

    let conn = state.db.connect().unwrap();
    ReportMapper::new(&conn, &state.schema)
        .create(&mut report)
        .expect("Failed to store report")
}
