//! End-to-end scrape cycles: mock HTTP endpoints, a real fetcher, a real
//! database file, and a recording notifier.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

use jobwatch::db;
use jobwatch::domain::keywords::KeywordSet;
use jobwatch::domain::models::{EndpointConfig, JobRecord};
use jobwatch::repository::JobRepository;
use jobwatch::service::{HttpFetcher, Notifier, ScrapeService};

#[derive(Clone, Default)]
struct RecordingNotifier {
    batches: Arc<Mutex<Vec<Vec<JobRecord>>>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, jobs: &[JobRecord]) -> jobwatch::error::Result<()> {
        self.batches.lock().unwrap().push(jobs.to_vec());
        Ok(())
    }
}

const TEMPLATE_PAGE: &str = r#"
    <html><body>
      <ul class="positions">
        <li>
          <a class="positionItem" href="/jobs/acme/junior-backend/AA.001">
            <span class="positionLink">Junior Backend Developer</span>
          </a>
          <ul>
            <li ng-if="position.location"><i class="icon-pin"></i>Tel Aviv, Israel</li>
            <li>Entry-level</li>
            <li>Full-time</li>
          </ul>
        </li>
        <li>
          <a class="positionItem" href="/jobs/acme/cto/AA.002">
            <span class="positionLink">VP Engineering</span>
          </a>
          <ul>
            <li ng-if="position.location"><i class="icon-pin"></i>Tel Aviv, Israel</li>
            <li>Senior</li>
          </ul>
        </li>
      </ul>
    </body></html>
"#;

const EMBEDDED_PAGE: &str = r#"
    <html><body>
      <div id="app"></div>
      <script>
        var openPositions = [
          {"title": "Junior QA Engineer", "location": "Haifa", "description": "Test the platform", "id": "qa-42"},
          {"title": "Senior Architect", "location": "Berlin", "id": "arch-1"}
        ];
      </script>
    </body></html>
"#;

fn endpoint(server: &mockito::ServerGuard, name: &str, path: &str) -> EndpointConfig {
    EndpointConfig {
        company_name: name.to_string(),
        source_url: Url::parse(&format!("{}{path}", server.url())).unwrap(),
    }
}

#[tokio::test]
async fn full_cycle_stores_new_juniors_and_is_idempotent() {
    let mut server = mockito::Server::new_async().await;
    let _acme = server
        .mock("GET", "/careers/acme")
        .with_status(200)
        .with_body(TEMPLATE_PAGE)
        .create_async()
        .await;
    let _globex = server
        .mock("GET", "/careers/globex")
        .with_status(200)
        .with_body(EMBEDDED_PAGE)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("jobs.db");
    let pool = db::init_db(db_path.to_str().unwrap()).await.unwrap();

    let notifier = RecordingNotifier::default();
    let batches = notifier.batches.clone();

    let service = ScrapeService::new(
        HttpFetcher::new(Duration::from_secs(5), 0, Duration::from_millis(1)).unwrap(),
        notifier,
        JobRepository::new(pool.clone()),
        KeywordSet::builtin(),
        vec![
            endpoint(&server, "acme", "/careers/acme"),
            endpoint(&server, "globex", "/careers/globex"),
        ],
    );

    // First cycle: one junior posting per endpoint survives classification.
    let new_jobs = service.run_cycle().await.unwrap();
    assert_eq!(new_jobs, 2);

    {
        let batches = batches.lock().unwrap();
        assert_eq!(batches.len(), 1);
        let titles: Vec<&str> = batches[0].iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["Junior Backend Developer", "Junior QA Engineer"]);
    }

    let repo = JobRepository::new(pool);
    assert_eq!(repo.count().await.unwrap(), 2);

    let stored = repo.recent(10).await.unwrap();
    let acme = stored.iter().find(|j| j.company == "acme").unwrap();
    assert_eq!(acme.title, "Junior Backend Developer");
    assert_eq!(acme.location, "Tel Aviv, Israel");
    assert_eq!(acme.link, "/jobs/acme/junior-backend/AA.001");

    let globex = stored.iter().find(|j| j.company == "globex").unwrap();
    assert_eq!(globex.description, "Test the platform");
    assert!(globex.link.ends_with("/careers/qa-42"));

    // Second cycle: same pages, nothing new stored, empty digest batch.
    let new_jobs = service.run_cycle().await.unwrap();
    assert_eq!(new_jobs, 0);
    assert_eq!(repo.count().await.unwrap(), 2);

    let batches = batches.lock().unwrap();
    assert_eq!(batches.len(), 2);
    assert!(batches[1].is_empty());
}

#[tokio::test]
async fn unreachable_endpoint_does_not_abort_the_cycle() {
    let mut server = mockito::Server::new_async().await;
    let _down = server
        .mock("GET", "/careers/down")
        .with_status(503)
        .create_async()
        .await;
    let _up = server
        .mock("GET", "/careers/up")
        .with_status(200)
        .with_body(TEMPLATE_PAGE)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("jobs.db");
    let pool = db::init_db(db_path.to_str().unwrap()).await.unwrap();

    let service = ScrapeService::new(
        HttpFetcher::new(Duration::from_secs(5), 0, Duration::from_millis(1)).unwrap(),
        RecordingNotifier::default(),
        JobRepository::new(pool),
        KeywordSet::builtin(),
        vec![
            endpoint(&server, "downco", "/careers/down"),
            endpoint(&server, "upco", "/careers/up"),
        ],
    );

    assert_eq!(service.run_cycle().await.unwrap(), 1);
}
