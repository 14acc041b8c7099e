use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::engine;
use crate::models::{CycleEntry, CyclePrediction, EntryPatch, NewEntry};

// All state lives in process memory. Predictions are a derived cache:
// every entry write recomputes the forecast from the full history and
// appends a fresh record, and "current" is the newest by created_at.
#[derive(Debug, Default)]
pub struct Store {
    entries: RwLock<HashMap<Uuid, CycleEntry>>,
    predictions: RwLock<HashMap<Uuid, CyclePrediction>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries_for_user(&self, user_id: Uuid) -> Vec<CycleEntry> {
        let entries = self.entries.read().await;
        let mut list: Vec<CycleEntry> = entries
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by_key(|e| e.date);
        list
    }

    pub async fn entries_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<CycleEntry> {
        let entries = self.entries.read().await;
        let mut list: Vec<CycleEntry> = entries
            .values()
            .filter(|e| e.user_id == user_id && e.date >= start && e.date <= end)
            .cloned()
            .collect();
        list.sort_by_key(|e| e.date);
        list
    }

    pub async fn entry_by_date(&self, user_id: Uuid, date: NaiveDate) -> Option<CycleEntry> {
        let entries = self.entries.read().await;
        entries
            .values()
            .find(|e| e.user_id == user_id && e.date == date)
            .cloned()
    }

    // One entry per user per date: a second write for the same day
    // replaces the first instead of duplicating it.
    pub async fn upsert_entry(&self, new: NewEntry) -> CycleEntry {
        let entry = {
            let mut entries = self.entries.write().await;
            if let Some(existing) = entries
                .values_mut()
                .find(|e| e.user_id == new.user_id && e.date == new.date)
            {
                existing.period_flow = new.period_flow;
                existing.symptoms = new.symptoms;
                existing.moods = new.moods;
                existing.notes = new.notes;
                existing.clone()
            } else {
                let entry = CycleEntry {
                    id: Uuid::new_v4(),
                    user_id: new.user_id,
                    date: new.date,
                    period_flow: new.period_flow,
                    symptoms: new.symptoms,
                    moods: new.moods,
                    notes: new.notes,
                    created_at: Utc::now(),
                };
                entries.insert(entry.id, entry.clone());
                entry
            }
        };
        self.refresh_prediction(entry.user_id).await;
        entry
    }

    pub async fn update_entry(&self, id: Uuid, patch: EntryPatch) -> Option<CycleEntry> {
        let updated = {
            let mut entries = self.entries.write().await;
            let entry = entries.get_mut(&id)?;
            if let Some(date) = patch.date {
                entry.date = date;
            }
            if let Some(flow) = patch.period_flow {
                entry.period_flow = Some(flow);
            }
            if let Some(symptoms) = patch.symptoms {
                entry.symptoms = symptoms;
            }
            if let Some(moods) = patch.moods {
                entry.moods = moods;
            }
            if let Some(notes) = patch.notes {
                entry.notes = Some(notes);
            }
            entry.clone()
        };
        self.refresh_prediction(updated.user_id).await;
        Some(updated)
    }

    pub async fn predictions_for_user(&self, user_id: Uuid) -> Vec<CyclePrediction> {
        let predictions = self.predictions.read().await;
        let mut list: Vec<CyclePrediction> = predictions
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by_key(|p| p.created_at);
        list
    }

    pub async fn current_prediction(&self, user_id: Uuid) -> Option<CyclePrediction> {
        let predictions = self.predictions.read().await;
        predictions
            .values()
            .filter(|p| p.user_id == user_id)
            .max_by_key(|p| p.created_at)
            .cloned()
    }

    async fn refresh_prediction(&self, user_id: Uuid) {
        let entries = self.entries_for_user(user_id).await;
        let forecast = engine::predict_next_cycle(&entries, Utc::now().date_naive());
        let Some(window) = forecast.prediction else {
            // Nothing bleed-shaped in the history yet.
            return;
        };
        let prediction = CyclePrediction {
            id: Uuid::new_v4(),
            user_id,
            window,
            created_at: Utc::now(),
        };
        tracing::debug!("🔮 refreshed prediction for {}", user_id);
        self.predictions.write().await.insert(prediction.id, prediction);
    }
}
