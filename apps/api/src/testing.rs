//! In-memory fakes of every collaborator plus document fixtures, shared by unit
//! and router tests.

use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use bytes::Bytes;
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::analysis::schema::{GapAnalysis, KeywordSet, Suggestion};
use crate::analysis::{AnalysisError, Analyzer, StructuredAnalysis};
use crate::auth::IdentityVerifier;
use crate::config::Config;
use crate::cv::links::ShortLink;
use crate::cv::{BlobStorage, CvStore, LinkStore};
use crate::db::StoreError;
use crate::errors::AppError;
use crate::jobs::{AnalysisTask, JobRunner, JobStore, Orchestrator, Scheduler, TokioScheduler};
use crate::models::cv::{CvSummary, NewSourceDocument, SourceDocument};
use crate::models::job::{AnalysisJob, JobOutcome, JobSummary, TerminalOutcome};
use crate::parser::{DocumentParser, PageRecognizer, ParseError};
use crate::routes::build_router;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// Jobs and CVs in one place so the CV-deletion `SET NULL` can be mirrored.
#[derive(Default)]
pub struct MemoryDb {
    jobs: Mutex<Vec<AnalysisJob>>,
    cvs: Mutex<Vec<SourceDocument>>,
    fail_cv_inserts: AtomicBool,
    fail_cv_reads: AtomicBool,
}

impl MemoryDb {
    pub fn seed_cv(&self, owner: Uuid, file_name: &str, text: &str) -> SourceDocument {
        let doc = SourceDocument {
            id: Uuid::new_v4(),
            user_id: owner,
            file_name: file_name.to_string(),
            cv_text_content: text.to_string(),
            file_path: format!("{owner}/{}.pdf", Uuid::new_v4()),
            created_at: Utc::now(),
        };
        self.cvs.lock().unwrap().push(doc.clone());
        doc
    }

    pub fn seed_job(&self, owner: Uuid, cv_id: Uuid, job_description_text: &str) -> AnalysisJob {
        let job = AnalysisJob {
            id: Uuid::new_v4(),
            owner,
            cv_id: Some(cv_id),
            job_description_text: job_description_text.to_string(),
            outcome: JobOutcome::Pending,
            created_at: Utc::now(),
        };
        self.jobs.lock().unwrap().push(job.clone());
        job
    }

    pub fn job(&self, id: Uuid) -> Option<AnalysisJob> {
        self.jobs.lock().unwrap().iter().find(|j| j.id == id).cloned()
    }

    pub fn cv(&self, id: Uuid) -> Option<SourceDocument> {
        self.cvs.lock().unwrap().iter().find(|c| c.id == id).cloned()
    }

    pub fn cv_count(&self) -> usize {
        self.cvs.lock().unwrap().len()
    }

    pub fn remove_cv(&self, id: Uuid) {
        self.cvs.lock().unwrap().retain(|c| c.id != id);
        for job in self.jobs.lock().unwrap().iter_mut() {
            if job.cv_id == Some(id) {
                job.cv_id = None;
            }
        }
    }

    pub fn remove_job(&self, id: Uuid) {
        self.jobs.lock().unwrap().retain(|j| j.id != id);
    }

    pub fn fail_cv_inserts(&self) {
        self.fail_cv_inserts.store(true, Ordering::SeqCst);
    }

    pub fn fail_cv_reads(&self) {
        self.fail_cv_reads.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl JobStore for MemoryDb {
    async fn create(
        &self,
        owner: Uuid,
        cv_id: Uuid,
        job_description_text: &str,
    ) -> Result<AnalysisJob, StoreError> {
        let owned = self
            .cvs
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.id == cv_id && c.user_id == owner);
        if !owned {
            return Err(StoreError::ReferenceRejected);
        }
        Ok(self.seed_job(owner, cv_id, job_description_text))
    }

    async fn finish(
        &self,
        job_id: Uuid,
        owner: Uuid,
        outcome: &TerminalOutcome,
    ) -> Result<bool, StoreError> {
        let mut jobs = self.jobs.lock().unwrap();
        match jobs.iter_mut().find(|j| j.id == job_id && j.owner == owner) {
            Some(job) => {
                job.outcome = outcome.clone().into();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get(&self, job_id: Uuid, owner: Uuid) -> Result<Option<AnalysisJob>, StoreError> {
        Ok(self.job(job_id).filter(|j| j.owner == owner))
    }

    async fn list(&self, owner: Uuid) -> Result<Vec<JobSummary>, StoreError> {
        let cvs = self.cvs.lock().unwrap();
        let mut summaries: Vec<JobSummary> = self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|j| j.owner == owner)
            .map(|j| JobSummary {
                id: j.id,
                cv_file_name: j
                    .cv_id
                    .and_then(|id| cvs.iter().find(|c| c.id == id))
                    .map(|c| c.file_name.clone()),
                job_description_text: j.job_description_text.clone(),
                status: j.status(),
                created_at: j.created_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }

    async fn delete(&self, job_id: Uuid, owner: Uuid) -> Result<(), StoreError> {
        self.jobs
            .lock()
            .unwrap()
            .retain(|j| !(j.id == job_id && j.owner == owner));
        Ok(())
    }
}

#[async_trait]
impl CvStore for MemoryDb {
    async fn insert(&self, doc: NewSourceDocument) -> Result<SourceDocument, StoreError> {
        if self.fail_cv_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        let row = SourceDocument {
            id: Uuid::new_v4(),
            user_id: doc.owner,
            file_name: doc.file_name,
            cv_text_content: doc.extracted_text,
            file_path: doc.storage_path,
            created_at: Utc::now(),
        };
        self.cvs.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn get(&self, cv_id: Uuid, owner: Uuid) -> Result<Option<SourceDocument>, StoreError> {
        if self.fail_cv_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self.cv(cv_id).filter(|c| c.user_id == owner))
    }

    async fn list(&self, owner: Uuid) -> Result<Vec<CvSummary>, StoreError> {
        let mut cvs: Vec<CvSummary> = self
            .cvs
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|c| c.user_id == owner)
            .map(|c| CvSummary {
                id: c.id,
                file_name: c.file_name.clone(),
                created_at: c.created_at,
            })
            .collect();
        cvs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(cvs)
    }

    async fn delete(&self, cv_id: Uuid, owner: Uuid) -> Result<bool, StoreError> {
        if self.cv(cv_id).is_some_and(|c| c.user_id == owner) {
            self.remove_cv(cv_id);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[derive(Default)]
pub struct MemoryBlobs {
    objects: Mutex<HashMap<String, Bytes>>,
    fail_removes: AtomicBool,
}

impl MemoryBlobs {
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn fail_removes(&self) {
        self.fail_removes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlobStorage for MemoryBlobs {
    async fn put(&self, key: &str, body: Bytes, _content_type: &str) -> Result<(), AppError> {
        self.objects.lock().unwrap().insert(key.to_string(), body);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(AppError::S3("bucket unavailable".to_string()));
        }
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    async fn signed_url(&self, key: &str, expires_in: Duration) -> Result<String, AppError> {
        Ok(format!(
            "https://blobs.test/{key}?expires_in={}",
            expires_in.as_secs()
        ))
    }
}

#[derive(Default)]
pub struct MemoryLinks {
    links: Mutex<HashMap<String, ShortLink>>,
    always_collide: bool,
    attempts: AtomicUsize,
}

impl MemoryLinks {
    pub fn always_colliding() -> Self {
        Self {
            always_collide: true,
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Moves a link's expiry into the past.
    pub fn expire(&self, code: &str) {
        if let Some(link) = self.links.lock().unwrap().get_mut(code) {
            link.expires_at = Utc::now() - chrono::Duration::seconds(1);
        }
    }
}

#[async_trait]
impl LinkStore for MemoryLinks {
    async fn insert_if_absent(
        &self,
        code: &str,
        link: &ShortLink,
        _ttl: Duration,
    ) -> Result<bool, AppError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.always_collide {
            return Ok(false);
        }
        let mut links = self.links.lock().unwrap();
        if links.contains_key(code) {
            return Ok(false);
        }
        links.insert(code.to_string(), link.clone());
        Ok(true)
    }

    async fn resolve(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.links.lock().unwrap().get(code).cloned())
    }
}

// ---------------------------------------------------------------------------
// Identity, analysis, scheduling, OCR
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct StaticIdentity {
    tokens: HashMap<String, Uuid>,
}

impl StaticIdentity {
    pub fn with(mut self, token: &str, user: Uuid) -> Self {
        self.tokens.insert(token.to_string(), user);
        self
    }
}

#[async_trait]
impl IdentityVerifier for StaticIdentity {
    async fn verify(&self, token: &str) -> Result<Uuid, AppError> {
        self.tokens.get(token).copied().ok_or(AppError::Unauthorized)
    }
}

const HARD_SKILLS: &[&str] = &["Python", "SQL", "Docker", "Kubernetes", "Rust", "Java"];
const SOFT_SKILLS: &[&str] = &["Leadership", "Communication", "Teamwork"];

enum Script {
    KeywordMatcher,
    Fail(fn() -> AnalysisError),
}

/// Deterministic [`Analyzer`]: matches a fixed vocabulary instead of calling a model.
pub struct ScriptedAnalyzer {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedAnalyzer {
    pub fn keyword_matcher() -> Self {
        Self {
            script: Script::KeywordMatcher,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: fn() -> AnalysisError) -> Self {
        Self {
            script: Script::Fail(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn mentioned(vocabulary: &[&str], text: &str) -> Vec<String> {
    let text = text.to_lowercase();
    vocabulary
        .iter()
        .filter(|skill| text.contains(&skill.to_lowercase()))
        .map(|s| s.to_string())
        .collect()
}

fn keyword_set(text: &str) -> KeywordSet {
    KeywordSet {
        hard_skills: mentioned(HARD_SKILLS, text),
        soft_skills: mentioned(SOFT_SKILLS, text),
    }
}

#[async_trait]
impl Analyzer for ScriptedAnalyzer {
    async fn analyze(
        &self,
        cv_text: &str,
        job_description_text: &str,
    ) -> Result<StructuredAnalysis, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script {
            Script::Fail(error) => Err(error()),
            Script::KeywordMatcher => {
                let job_keywords = keyword_set(job_description_text);
                let cv_keywords = keyword_set(cv_text);
                let wanted: Vec<String> = job_keywords
                    .hard_skills
                    .iter()
                    .chain(&job_keywords.soft_skills)
                    .cloned()
                    .collect();
                let (matching_skills, missing_skills): (Vec<String>, Vec<String>) =
                    wanted.into_iter().partition(|skill| {
                        cv_keywords.hard_skills.contains(skill)
                            || cv_keywords.soft_skills.contains(skill)
                    });
                let suggestions = missing_skills
                    .iter()
                    .map(|skill| Suggestion {
                        title: format!("Show {skill} experience"),
                        detail: format!("The job asks for {skill} but the CV never mentions it."),
                        example: format!("Delivered a production service using {skill}."),
                    })
                    .collect();
                Ok(StructuredAnalysis {
                    job_keywords,
                    cv_keywords,
                    gap_analysis: GapAnalysis {
                        matching_skills,
                        missing_skills,
                    },
                    suggestions,
                    cover_letter_draft: "Dear hiring team, I would like to apply.".to_string(),
                })
            }
        }
    }
}

/// Collects scheduled tasks so tests decide when (and whether) they run.
#[derive(Default)]
pub struct ManualScheduler {
    tasks: Mutex<Vec<AnalysisTask>>,
}

impl ManualScheduler {
    pub fn take(&self) -> Vec<AnalysisTask> {
        std::mem::take(&mut *self.tasks.lock().unwrap())
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, task: AnalysisTask) {
        self.tasks.lock().unwrap().push(task);
    }
}

pub struct StubRecognizer {
    pages: Option<Vec<String>>,
    calls: AtomicUsize,
}

impl StubRecognizer {
    pub fn pages(pages: &[&str]) -> Self {
        Self {
            pages: Some(pages.iter().map(|p| p.to_string()).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Behaves like a host without tesseract installed.
    pub fn missing() -> Self {
        Self {
            pages: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PageRecognizer for StubRecognizer {
    fn recognize_pages(&self, _pdf: &[u8]) -> Result<Vec<String>, ParseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages.clone().ok_or_else(|| {
            ParseError::ParserEngineMissing("'tesseract' is not installed or not on PATH".to_string())
        })
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn sample_analysis() -> StructuredAnalysis {
    StructuredAnalysis {
        job_keywords: KeywordSet {
            hard_skills: vec!["Python".into(), "SQL".into(), "Docker".into()],
            soft_skills: vec!["Communication".into()],
        },
        cv_keywords: KeywordSet {
            hard_skills: vec!["Python".into(), "SQL".into()],
            soft_skills: vec![],
        },
        gap_analysis: GapAnalysis {
            matching_skills: vec!["Python".into(), "SQL".into()],
            missing_skills: vec!["Docker".into(), "Communication".into()],
        },
        suggestions: vec![Suggestion {
            title: "Mention containers".into(),
            detail: "Add any Docker usage from past projects.".into(),
            example: "Containerized the reporting service with Docker.".into(),
        }],
        cover_letter_draft: "Dear hiring team, ...".into(),
    }
}

fn pdf_with_content(content: Vec<u8>) -> Vec<u8> {
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Single-page PDF with a real text layer, one line per entry.
pub fn text_pdf(lines: &[&str]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::Object;

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("TL", vec![16.into()]),
        Operation::new("Td", vec![72.into(), 760.into()]),
    ];
    for line in lines {
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    pdf_with_content(Content { operations }.encode().unwrap())
}

/// Single-page PDF without any text, like a scan.
pub fn blank_pdf() -> Vec<u8> {
    pdf_with_content(Vec::new())
}

pub fn docx_from_xml(document_xml: &str) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(document_xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    docx_from_xml(&format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    ))
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/cvgap_test".to_string(),
        redis_url: "redis://localhost".to_string(),
        s3_bucket: "user-uploads".to_string(),
        s3_endpoint: "http://localhost:9000".to_string(),
        aws_access_key_id: "test".to_string(),
        aws_secret_access_key: "test".to_string(),
        anthropic_api_key: "test".to_string(),
        auth_url: "http://localhost:9999".to_string(),
        auth_api_key: "test".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        ocr_languages: vec!["eng".to_string()],
        ocr_dpi: 150,
        pdftoppm_bin: "pdftoppm".to_string(),
        tesseract_bin: "tesseract".to_string(),
        download_link_ttl_secs: 60,
        max_upload_bytes: 1024 * 1024,
    }
}

// ---------------------------------------------------------------------------
// Router harness
// ---------------------------------------------------------------------------

pub const ALICE: &str = "alice-token";
pub const BOB: &str = "bob-token";

pub enum Execution {
    /// Tasks wait in a [`ManualScheduler`] until `run_scheduled` is called.
    Manual,
    /// Tasks run on the tokio runtime as in production.
    Background,
}

pub struct TestApp {
    pub router: Router,
    pub db: Arc<MemoryDb>,
    pub blobs: Arc<MemoryBlobs>,
    pub links: Arc<MemoryLinks>,
    pub analyzer: Arc<ScriptedAnalyzer>,
    pub alice: Uuid,
    pub bob: Uuid,
    manual: Arc<ManualScheduler>,
    runner: Arc<JobRunner>,
}

impl TestApp {
    pub fn new(recognizer: StubRecognizer, execution: Execution) -> Self {
        Self::with_analyzer(recognizer, execution, ScriptedAnalyzer::keyword_matcher())
    }

    pub fn with_analyzer(
        recognizer: StubRecognizer,
        execution: Execution,
        analyzer: ScriptedAnalyzer,
    ) -> Self {
        let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());
        let db = Arc::new(MemoryDb::default());
        let blobs = Arc::new(MemoryBlobs::default());
        let links = Arc::new(MemoryLinks::default());
        let analyzer = Arc::new(analyzer);
        let runner = Arc::new(JobRunner::new(db.clone(), db.clone(), analyzer.clone()));
        let manual = Arc::new(ManualScheduler::default());

        let scheduler: Arc<dyn Scheduler> = match execution {
            Execution::Manual => manual.clone(),
            Execution::Background => Arc::new(TokioScheduler::new(runner.clone())),
        };

        let state = AppState {
            identity: Arc::new(StaticIdentity::default().with(ALICE, alice).with(BOB, bob)),
            orchestrator: Arc::new(Orchestrator::new(db.clone(), scheduler)),
            cvs: db.clone(),
            blobs: blobs.clone(),
            links: links.clone(),
            parser: DocumentParser::new(Arc::new(recognizer)),
            config: test_config(),
        };

        Self {
            router: build_router(state),
            db,
            blobs,
            links,
            analyzer,
            alice,
            bob,
            manual,
            runner,
        }
    }

    /// Runs every task the manual scheduler has collected so far.
    pub async fn run_scheduled(&self) {
        for task in self.manual.take() {
            self.runner.execute(task).await;
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Sends the request and decodes the body as JSON (`Null` when empty).
    pub async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.send(request).await;
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }
}

pub fn get(uri: &str, token: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str, token: &str) -> Request<Body> {
    Request::delete(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn upload(token: &str, file_name: &str, bytes: &[u8]) -> Request<Body> {
    const BOUNDARY: &str = "cvgap-test-boundary";
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::post("/api/v1/cv/upload")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
