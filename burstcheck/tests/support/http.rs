use std::net::SocketAddr;

use burstcheck::{db::bootstrap, server::serve_on, AppState};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

/// テスト用に実ポートで起動したburstcheckサーバー
#[allow(dead_code)]
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<std::io::Result<()>>,
}

#[allow(dead_code)]
impl TestServer {
    /// サーバーがバインドしているアドレスを返す
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://127.0.0.1:<port><path>`
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// サーバーを停止し、バックグラウンドタスクの終了を待つ
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}

/// インメモリDBでサーバーを起動する
pub async fn spawn_test_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let db_pool = bootstrap::connect("sqlite::memory:").await.unwrap();
    bootstrap::ensure_users_table(&db_pool).await.unwrap();
    let state = AppState {
        db_pool,
        port: addr.port(),
        db_label: "sqlite::memory:".to_string(),
    };

    let (tx, rx) = oneshot::channel();
    let handle = tokio::spawn(serve_on(listener, state, async {
        let _ = rx.await;
    }));

    TestServer {
        addr,
        shutdown: Some(tx),
        handle,
    }
}

/// Address nothing is listening on
pub fn unused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
