use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct SummaryRow {
    rank: usize,
    store_name: String,
    target_date: String,
    as_of_date: String,
    total_net_sales: f64,
    percent_achieved: Option<f64>,
    percent_label: String,
    exceeded: bool,
}

#[derive(Debug, Deserialize)]
struct Series {
    labels: Vec<String>,
    running_total: Vec<Option<f64>>,
    daily_target: Vec<f64>,
    percent_achieved: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct DetailRow {
    net_sales: String,
    running_total: String,
    percent: String,
}

#[derive(Debug, Deserialize)]
struct Sales {
    store_name: String,
    period_end_label: String,
    projected_label: String,
    has_data: bool,
    series: Series,
    rows: Vec<DetailRow>,
    totals: DetailRow,
}

const FIXTURE: &str = r#"[
  {"storname": "Alpha", "storegrp": "Retail", "netsales": 300, "datesale": "12/01/2024",
   "begindte": "12/01/2024", "targdate": "12/31/2024", "targsale": 1000,
   "runtotal": 300, "run_targ": 32.26, "pctachvd": 30},
  {"storname": "Alpha", "storegrp": "Retail", "netsales": 0, "datesale": "12/02/2024",
   "begindte": "12/01/2024", "targdate": "12/31/2024", "targsale": 1000,
   "runtotal": 300, "run_targ": 64.52, "pctachvd": 30},
  {"storname": "Alpha", "storegrp": "Retail", "netsales": 400, "datesale": "12/03/2024",
   "begindte": "12/01/2024", "targdate": "12/31/2024", "targsale": 1000,
   "runtotal": 700, "run_targ": 96.77, "pctachvd": 70},
  {"storname": "Beta", "storegrp": "Food", "netsales": 1200, "datesale": "11/05/2024",
   "begindte": "11/01/2024", "targdate": "11/30/2024", "targsale": 1000,
   "runtotal": 1200, "run_targ": 166.67, "pctachvd": 120},
  {"storname": "Gamma", "storegrp": "Fuel", "netsales": 50, "datesale": "12/02/2024",
   "begindte": "12/01/2024", "targdate": "12/31/2024", "targsale": 0,
   "runtotal": 50, "run_targ": 0, "pctachvd": 0},
  {"storname": "Broken", "storegrp": "Retail", "netsales": 10, "datesale": "31/12/2024",
   "begindte": "12/01/2024", "targdate": "12/31/2024", "targsale": 100,
   "runtotal": 10, "run_targ": 0, "pctachvd": 10}
]"#;

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_source_path() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("sales_target_http_{}_{}.json", std::process::id(), nanos));
    path
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(source_path: &Path) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_sales_target"))
        .env("PORT", port.to_string())
        .env("SALES_DATA_PATH", source_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let source_path = unique_source_path();
    std::fs::write(&source_path, FIXTURE).expect("write fixture");
    let server = Arc::new(spawn_server(&source_path).await);
    *guard = Some(Arc::clone(&server));
    server
}

#[tokio::test]
async fn http_summaries_are_ranked_by_recent_period() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let rows: Vec<SummaryRow> = client
        .get(format!("{}/api/summaries", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let order: Vec<_> = rows.iter().map(|row| row.store_name.as_str()).collect();
    assert_eq!(order, vec!["Alpha", "Gamma", "Beta"]);
    assert_eq!(rows.iter().map(|row| row.rank).collect::<Vec<_>>(), vec![1, 2, 3]);

    let alpha = &rows[0];
    assert_eq!(alpha.target_date, "12/31/2024");
    assert_eq!(alpha.as_of_date, "12/03/2024");
    assert_eq!(alpha.total_net_sales, 700.0);
    assert_eq!(alpha.percent_achieved, Some(70.0));
    assert_eq!(alpha.percent_label, "70.00%");
    assert!(!alpha.exceeded);

    let gamma = &rows[1];
    assert_eq!(gamma.percent_achieved, None);
    assert_eq!(gamma.percent_label, "N/A");

    assert!(rows[2].exceeded);
}

#[tokio::test]
async fn http_summaries_filter_by_group() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let food: Vec<SummaryRow> = client
        .get(format!("{}/api/summaries?group=Food&order=store", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(food.len(), 1);
    assert_eq!(food[0].store_name, "Beta");

    let all: Vec<SummaryRow> = client
        .get(format!(
            "{}/api/summaries?group=All%20Business%20Group",
            server.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let response = client
        .get(format!("{}/api/summaries?order=sideways", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_sales_view_for_selected_period() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let sales: Sales = client
        .get(format!(
            "{}/api/sales?store=Alpha&target=12/31/2024",
            server.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(sales.has_data);
    assert_eq!(sales.store_name, "Alpha");
    assert_eq!(sales.period_end_label, "12/3/2024");
    assert_eq!(sales.projected_label, "1,000.00");
    assert_eq!(sales.series.labels, vec!["12/01", "12/02", "12/03"]);
    assert_eq!(sales.series.running_total, vec![Some(300.0), None, Some(700.0)]);
    assert_eq!(sales.series.daily_target.len(), 3);
    assert_eq!(sales.series.percent_achieved, vec![30.0, 30.0, 70.0]);

    assert_eq!(sales.rows.len(), 2);
    assert_eq!(sales.rows[0].net_sales, "300.00");
    assert_eq!(sales.totals.net_sales, "700.00");
    assert_eq!(sales.totals.running_total, "700.00");
    assert_eq!(sales.totals.percent, "70.00%");
}

#[tokio::test]
async fn http_sales_view_without_matches_is_empty() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let sales: Sales = client
        .get(format!("{}/api/sales?store=Nobody", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(!sales.has_data);
    assert!(sales.series.labels.is_empty());
    assert!(sales.rows.is_empty());
    assert_eq!(sales.projected_label, "0.00");
}

#[tokio::test]
async fn http_categories_and_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let categories: Vec<String> = client
        .get(format!("{}/api/categories", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(categories, vec!["All Business Group", "Retail", "Food", "Fuel"]);

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(r#"<option value="Food">Food</option>"#));
}

#[tokio::test]
async fn http_missing_source_is_unavailable() {
    let _guard = TEST_LOCK.lock().await;
    let server = spawn_server(&unique_source_path()).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/summaries", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(page.status().is_success());
}
