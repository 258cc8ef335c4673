use notepad::errors::NoteStoreError;
use notepad::notestore::util::populate_test_data;
use notepad::notestore::BoxedNoteStore;
use notepad::{Address, InMemoryStore, NoteStore, StoreConfig};

#[derive(serde::Deserialize, Debug)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub administrator: Address,
    maxcontentlength: Option<usize>,
    populateinmemorystore: bool,
    restorefrom: Option<String>,
    pub backupto: Option<String>,
    pub otlpendpoint: Option<String>,
}

impl Settings {
    pub fn store_config(&self) -> StoreConfig {
        let config = StoreConfig::new(self.administrator);
        match self.maxcontentlength {
            Some(max) => config.with_max_content_length(max),
            None => config,
        }
    }

    pub async fn get_note_store(&self) -> Result<BoxedNoteStore, NoteStoreError> {
        if let Some(ref dir) = self.restorefrom {
            let store = InMemoryStore::restore(dir)?;
            info!(dir = %dir, "restored note store");
            if store.administrator() != self.administrator {
                warn!(
                    configured = %self.administrator,
                    restored = %store.administrator(),
                    "ignoring configured administrator, the restored store keeps its own"
                );
            }
            return Ok(Box::new(store));
        }
        let store: BoxedNoteStore = Box::new(InMemoryStore::with_config(self.store_config()));
        if self.populateinmemorystore {
            populate_test_data(&store).await?;
        }
        Ok(store)
    }
}

lazy_static! {
    pub static ref CONFIGURATION: Settings =
        get_configuration().expect("Failed to read configuration.yml.");
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let config = config::Config::builder()
        .set_default("debug", false)?
        .set_default("host", "localhost")?
        .set_default("port", 8000)?
        .set_default("administrator", Address::ZERO.to_string())?
        .set_default("populateinmemorystore", false)?
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(
            config::Environment::default()
                .prefix("notepad")
                .separator("_"),
        )
        .build()?;
    config.try_deserialize()
}
