use actix_web::web::Data;
use lazy_static::lazy_static;
use notepad::notestore::BoxedNoteStore;
use notepad::{Address, InMemoryStore, StoreConfig};
use notepad_web::caller::CALLER_HEADER;
use notepad_web::configuration::CONFIGURATION;
use notepad_web::startup::run;
use notepad_web::telemetry::{get_subscriber, init_tracing};
use reqwest::{Client, RequestBuilder};
use std::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;

pub const ADMIN: Address = Address::new([0xad; 20]);
pub const USER1: Address = Address::new([1; 20]);
pub const USER2: Address = Address::new([2; 20]);
pub const USER3: Address = Address::new([3; 20]);

lazy_static! {
    static ref TRACING: () = {
        let subscriber = get_subscriber(&*CONFIGURATION)
            .with(tracing_subscriber::fmt::Layer::default().with_test_writer());
        init_tracing(subscriber);
    };
}

pub struct TestApp {
    pub address: String,
    pub client: Client,
}

impl TestApp {
    pub fn get(&self, caller: Address, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{}", self.address, path))
            .header(CALLER_HEADER, caller.to_string())
    }

    pub fn post(&self, caller: Address, path: &str) -> RequestBuilder {
        self.client
            .post(format!("{}{}", self.address, path))
            .header(CALLER_HEADER, caller.to_string())
    }

    pub fn put(&self, caller: Address, path: &str) -> RequestBuilder {
        self.client
            .put(format!("{}{}", self.address, path))
            .header(CALLER_HEADER, caller.to_string())
    }

    pub fn delete(&self, caller: Address, path: &str) -> RequestBuilder {
        self.client
            .delete(format!("{}{}", self.address, path))
            .header(CALLER_HEADER, caller.to_string())
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(StoreConfig::new(ADMIN)).await
}

pub async fn spawn_app_with(config: StoreConfig) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    // We retrieve the port assigned to us by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    lazy_static::initialize(&TRACING);

    let store: BoxedNoteStore = Box::new(InMemoryStore::with_config(config));
    let server = run(listener, Data::new(store)).expect("Failed to bind address");
    let _ = tokio::spawn(server);
    TestApp {
        address,
        client: Client::new(),
    }
}
