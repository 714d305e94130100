use drivebook::app;
use drivebook::config::environment::Environment;
use drivebook::config::scheduling::SchedulingSettings;
use drivebook::modules::Modules;
use reqwest::Client;
use std::net::{SocketAddr, TcpListener};

async fn spawn_app() -> SocketAddr {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).unwrap();
    let addr = listener.local_addr().unwrap();

    let modules = Modules::use_custom(
        addr,
        SchedulingSettings::default(),
        Environment::Development,
    );

    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app(modules.state()).into_make_service())
            .await
            .unwrap()
    });

    addr
}

pub struct AppData {
    pub addr: SocketAddr,
}

impl AppData {
    pub async fn new() -> Self {
        Self {
            addr: spawn_app().await,
        }
    }

    pub fn client(&self) -> Client {
        Client::builder()
            .build()
            .expect("Failed to build reqwest client")
    }

    pub fn api(&self, uri: &str) -> String {
        format!("http://{}{uri}", self.addr)
    }
}
