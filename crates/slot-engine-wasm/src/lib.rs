//! WASM bindings for slot-engine.
//!
//! Exposes slot generation, weekday expansion, overlap checks and batch building
//! to the admin panel via `wasm-bindgen`. Structured values cross the boundary as
//! JSON strings in the same camelCase shapes the admin API uses.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use slot_engine::clock::ClockTime;
use slot_engine::{
    build_batch, expand_weekdays, generate_slots, mark_slots, overlaps, parse_calendar_date,
    Exclusion, Slot, WeekdayFlags,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Slot shape used in the panel: the date plus `{time, length, available}`.
#[derive(Serialize, Deserialize)]
struct SlotDto {
    date: NaiveDate,
    time: ClockTime,
    length: u32,
    available: bool,
}

impl From<&Slot> for SlotDto {
    fn from(s: &Slot) -> Self {
        Self {
            date: s.date,
            time: s.start,
            length: s.length_minutes,
            available: s.available,
        }
    }
}

impl From<SlotDto> for Slot {
    fn from(d: SlotDto) -> Self {
        Slot {
            date: d.date,
            start: d.time,
            length_minutes: d.length,
            available: d.available,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_json<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn parse_time(s: &str) -> Result<ClockTime, String> {
    s.parse().map_err(|e| format!("Invalid time '{}': {}", s, e))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    parse_calendar_date(s).map_err(|e| e.to_string())
}

fn parse_slots(json: &str) -> Result<Vec<Slot>, String> {
    let dtos: Vec<SlotDto> = parse_json(json, "slots")?;
    Ok(dtos.into_iter().map(Slot::from).collect())
}

fn slots_json(slots: &[Slot]) -> Result<String, String> {
    let dtos: Vec<SlotDto> = slots.iter().map(SlotDto::from).collect();
    to_json(&dtos)
}

// ---------------------------------------------------------------------------
// Plain-Rust entry points (errors as strings, usable off the wasm target)
// ---------------------------------------------------------------------------

pub fn make_slots_json(date: &str, from: &str, to: &str, length: u32) -> Result<String, String> {
    let date = parse_date(date)?;
    let slots: Vec<Slot> = generate_slots(date, parse_time(from)?, parse_time(to)?, length)
        .iter()
        .collect();
    slots_json(&slots)
}

/// `weekdays` is the panel's `{"0": bool, ... "6": bool}` map (0 = Sunday);
/// Monday to Friday when absent.
pub fn expand_weekdays_json(from: &str, to: &str, weekdays: Option<&str>) -> Result<String, String> {
    let flags: WeekdayFlags = match weekdays {
        Some(json) => parse_json(json, "weekdays")?,
        None => WeekdayFlags::default(),
    };
    let dates = expand_weekdays(parse_date(from)?, parse_date(to)?, &flags)
        .map_err(|e| e.to_string())?;
    to_json(&dates)
}

pub fn slot_overlaps_json(slot: &str, exclusion: &str) -> Result<bool, String> {
    let slot: Slot = parse_json::<SlotDto>(slot, "slot")?.into();
    let exclusion: Exclusion = parse_json(exclusion, "exclusion")?;
    Ok(overlaps(&slot, &exclusion))
}

pub fn mark_slots_json(slots: &str, exclusions: &str) -> Result<String, String> {
    let slots = parse_slots(slots)?;
    let exclusions: Vec<Exclusion> = parse_json(exclusions, "exclusions")?;
    slots_json(&mark_slots(&slots, &exclusions))
}

pub fn build_batch_json(pending: &str, collapse_duplicates: bool) -> Result<String, String> {
    let pending: Vec<Exclusion> = parse_json(pending, "exclusions")?;
    for entry in &pending {
        entry.validate().map_err(|e| e.to_string())?;
    }
    let mut batch = build_batch(&pending);
    if collapse_duplicates {
        batch = batch.collapse_duplicates();
    }
    to_json(&batch)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Slots between `from` and `to` (`"HH:mm"`) on `date` (`"yyyy-MM-dd"`).
///
/// Returns a JSON array of `{date, time, length, available}`.
#[wasm_bindgen(js_name = "makeSlots")]
pub fn make_slots(date: &str, from: &str, to: &str, length: u32) -> Result<String, JsValue> {
    make_slots_json(date, from, to, length).map_err(|e| JsValue::from_str(&e))
}

/// Dates in `[from, to]` on the selected weekdays, as a JSON array of
/// `"yyyy-MM-dd"` strings.
#[wasm_bindgen(js_name = "expandWeekdays")]
pub fn expand_weekdays_js(
    from: &str,
    to: &str,
    weekdays_json: Option<String>,
) -> Result<String, JsValue> {
    expand_weekdays_json(from, to, weekdays_json.as_deref()).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = "slotOverlaps")]
pub fn slot_overlaps(slot_json: &str, exclusion_json: &str) -> Result<bool, JsValue> {
    slot_overlaps_json(slot_json, exclusion_json).map_err(|e| JsValue::from_str(&e))
}

/// Copies of `slots_json` with `available` cleared where any exclusion overlaps.
#[wasm_bindgen(js_name = "markSlots")]
pub fn mark_slots_js(slots_json: &str, exclusions_json: &str) -> Result<String, JsValue> {
    mark_slots_json(slots_json, exclusions_json).map_err(|e| JsValue::from_str(&e))
}

/// Wrap a JSON array of pending exclusions into the `{exclusions: [...]}` body.
#[wasm_bindgen(js_name = "buildBatch")]
pub fn build_batch_js(pending_json: &str, collapse_duplicates: bool) -> Result<String, JsValue> {
    build_batch_json(pending_json, collapse_duplicates).map_err(|e| JsValue::from_str(&e))
}
