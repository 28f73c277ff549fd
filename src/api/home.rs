use super::client::StoreClient;
use crate::content::home::HomeSection;
use crate::content::normalize::normalize_home;
use crate::content::validate::validate_section;
use crate::core::prelude::*;
use serde_json::Value;

const COLLECTION: &str = "home";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim().to_lowercase().as_str() {
            "up" => Ok(MoveDirection::Up),
            "down" => Ok(MoveDirection::Down),
            other => Err(AppError::Validation(format!(
                "Unknown direction '{}' (expected up or down)",
                other
            ))),
        }
    }

    /// Index of the neighbour to swap with, if it exists.
    pub fn target(self, index: usize, len: usize) -> Option<usize> {
        let target = match self {
            MoveDirection::Up => index.checked_sub(1)?,
            MoveDirection::Down => index.checked_add(1)?,
        };
        (index < len && target < len).then_some(target)
    }
}

#[derive(Debug)]
pub enum MoveOutcome {
    /// Target out of range; nothing was sent.
    Unchanged,
    /// Both writes were attempted and the list was refetched. `failures`
    /// holds the writes that did not go through.
    Moved {
        sections: Vec<HomeSection>,
        failures: Vec<(String, AppError)>,
    },
}

/// Stable sort, so equal orders keep the store's sequence.
pub fn sort_by_order(sections: &mut [HomeSection]) {
    sections.sort_by_key(|s| s.order);
}

impl StoreClient {
    pub async fn list_home_sections(&self) -> Result<Vec<HomeSection>> {
        let items = match self.get(COLLECTION).await? {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => {
                return Err(AppError::Decode(format!(
                    "{} list is not an array: {}",
                    COLLECTION, other
                )))
            }
        };

        let mut sections: Vec<HomeSection> = items
            .into_iter()
            .filter_map(|item| match normalize_home(item) {
                Ok(section) => Some(section),
                Err(e) => {
                    log::warn!("Skipping unreadable home section: {}", e);
                    None
                }
            })
            .collect();
        sort_by_order(&mut sections);
        Ok(sections)
    }

    /// Validates, then overwrites `home/<section>`. An invalid section never
    /// reaches the network.
    pub async fn save_home_section(&self, section: &HomeSection) -> Result<()> {
        validate_section(section)?;
        self.write_home_section(section).await?;
        log::info!("Home section {} saved", section.section);
        Ok(())
    }

    async fn write_home_section(&self, section: &HomeSection) -> Result<()> {
        self.post(&format!("{}/{}", COLLECTION, section.section), section)
            .await
            .map(|_| ())
    }

    pub async fn delete_home_section(&self, section_id: &str) -> Result<()> {
        self.delete(&format!("{}/{}", COLLECTION, section_id))
            .await?;
        log::info!("Home section {} deleted", section_id);
        Ok(())
    }

    /// Flips `isActive` and saves right away.
    pub async fn toggle_home_section(&self, section: &HomeSection) -> Result<HomeSection> {
        let mut toggled = section.clone();
        toggled.is_active = !toggled.is_active;
        self.save_home_section(&toggled).await?;
        Ok(toggled)
    }

    /// Swaps `order` with the neighbour and writes both sections concurrently.
    ///
    /// No rollback: when only one write succeeds the refetched list shows
    /// whatever the store now holds.
    pub async fn move_home_section(
        &self,
        sections: &[HomeSection],
        index: usize,
        direction: MoveDirection,
    ) -> Result<MoveOutcome> {
        let Some(target) = direction.target(index, sections.len()) else {
            return Ok(MoveOutcome::Unchanged);
        };

        let mut moved = sections[index].clone();
        let mut other = sections[target].clone();
        std::mem::swap(&mut moved.order, &mut other.order);

        let (first, second) = futures::join!(
            self.write_home_section(&moved),
            self.write_home_section(&other)
        );

        let failures: Vec<(String, AppError)> = [(moved.section, first), (other.section, second)]
            .into_iter()
            .filter_map(|(id, res)| res.err().map(|e| (id, e)))
            .collect();
        for (id, e) in &failures {
            log::warn!("Reorder write for {} failed: {}", id, e);
        }

        let sections = self.list_home_sections().await?;
        Ok(MoveOutcome::Moved { sections, failures })
    }
}
