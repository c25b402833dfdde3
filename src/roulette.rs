use crate::config::RouletteConfig;
use crate::error::RouletteError;

/// Storage key holding the topic list as a JSON array of strings
pub const TOPICS_KEY: &str = "rouletteTopics";

/// Shown when a topic file exists but holds no usable line
pub const PLACEHOLDER_TOPIC: &str = "Could not load topics";

pub const DEFAULT_TOPICS: [&str; 10] = [
    "apple", "cat", "house", "car", "flower", "bird", "mountain", "sea", "star", "sun",
];

/// Chooses an index in `0..len`. `len` is never zero.
pub trait TopicPicker {
    fn pick(&mut self, len: usize) -> usize;
}

/// Picks using the random bits of a v4 UUID
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidPicker;

impl TopicPicker for UuidPicker {
    fn pick(&mut self, len: usize) -> usize {
        (uuid::Uuid::new_v4().as_u128() % len as u128) as usize
    }
}

#[derive(Debug, Clone, Copy)]
struct Spin {
    ticks_done: u32,
    /// Time of the next flash, seconds on the UI clock
    next_tick_at: f64,
}

/// Random topic picker with a short "spinning" animation
#[derive(Debug, Clone)]
pub struct Roulette {
    topics: Vec<String>,
    display: String,
    spin: Option<Spin>,
    spin_ticks: u32,
    spin_interval: f64,
}

impl Roulette {
    pub fn new(topics: Vec<String>, config: &RouletteConfig) -> Self {
        let topics = if topics.is_empty() {
            default_topics()
        } else {
            topics
        };
        Self {
            topics,
            display: "?".to_owned(),
            spin: None,
            spin_ticks: config.spin_ticks,
            spin_interval: config.spin_interval_ms as f64 / 1000.0,
        }
    }

    /// Builds a roulette from the stored list, falling back to the topic
    /// file and then to the built-in defaults
    pub fn load(store: Option<&dyn eframe::Storage>, config: &RouletteConfig) -> Self {
        let topics = stored_topics(store)
            .unwrap_or_else(|| file_topics(config.topics_file.as_deref()));
        Self::new(topics, config)
    }

    /// Writes the current list under `TOPICS_KEY`
    pub fn save(&self, store: &mut dyn eframe::Storage) {
        match serde_json::to_string(&self.topics) {
            Ok(json) => store.set_string(TOPICS_KEY, json),
            Err(err) => log::error!("Failed to serialize topics: {}", err),
        }
    }

    /// Replaces the list with the non-empty lines of `text`.
    ///
    /// The previous list is kept when `text` has no usable line.
    pub fn replace_topics(&mut self, text: &str) -> Result<usize, RouletteError> {
        let topics = parse_topics(text);
        if topics.is_empty() {
            return Err(RouletteError::Empty);
        }
        self.topics = topics;
        log::info!("Saved {} topics", self.topics.len());
        Ok(self.topics.len())
    }

    /// The list as editable text, one topic per line
    pub fn edit_text(&self) -> String {
        self.topics.join("\n")
    }

    /// Starts spinning. Returns false if a spin is already running.
    pub fn start_spin(&mut self, now: f64) -> bool {
        if self.spin.is_some() {
            return false;
        }
        self.spin = Some(Spin {
            ticks_done: 0,
            next_tick_at: now + self.spin_interval,
        });
        true
    }

    /// Advances the animation to `now`. Returns true if the display changed.
    pub fn tick(&mut self, now: f64, picker: &mut dyn TopicPicker) -> bool {
        let Some(mut spin) = self.spin else {
            return false;
        };
        let mut changed = false;

        while now >= spin.next_tick_at && spin.ticks_done < self.spin_ticks {
            self.display = self.topics[picker.pick(self.topics.len())].clone();
            spin.ticks_done += 1;
            spin.next_tick_at += self.spin_interval;
            changed = true;
        }

        if spin.ticks_done >= self.spin_ticks {
            self.display = self.topics[picker.pick(self.topics.len())].clone();
            self.spin = None;
            return true;
        }

        self.spin = Some(spin);
        changed
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }
}

/// Trimmed, non-empty lines of `text`
pub fn parse_topics(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

fn default_topics() -> Vec<String> {
    DEFAULT_TOPICS.iter().map(|t| (*t).to_owned()).collect()
}

fn stored_topics(store: Option<&dyn eframe::Storage>) -> Option<Vec<String>> {
    let json = store?.get_string(TOPICS_KEY)?;
    match serde_json::from_str::<Vec<String>>(&json) {
        Ok(topics) => {
            let topics: Vec<String> = topics
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_owned)
                .collect();
            (!topics.is_empty()).then_some(topics)
        }
        Err(err) => {
            log::warn!("Ignoring stored topics: {}", err);
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn file_topics(path: Option<&str>) -> Vec<String> {
    let Some(path) = path else {
        return default_topics();
    };
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let topics = parse_topics(&text);
            if topics.is_empty() {
                vec![PLACEHOLDER_TOPIC.to_owned()]
            } else {
                topics
            }
        }
        Err(err) => {
            log::warn!("Failed to read topic file {}: {}", path, err);
            default_topics()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn file_topics(_path: Option<&str>) -> Vec<String> {
    default_topics()
}
