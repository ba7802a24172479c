//! 新建物料表单状态

use leptos::prelude::*;
use workshop_shared::{DEFAULT_MINIMUM_LEVEL, DEFAULT_UNIT, NewMaterial};

#[derive(Clone, Copy)]
pub struct FormState {
    pub name: RwSignal<String>,
    pub quantity: RwSignal<i64>,
    pub minimum_level: RwSignal<i64>,
    pub unit: RwSignal<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            quantity: RwSignal::new(0),
            minimum_level: RwSignal::new(DEFAULT_MINIMUM_LEVEL),
            unit: RwSignal::new(DEFAULT_UNIT.to_string()),
        }
    }

    pub fn reset(&self) {
        self.name.set(String::new());
        self.quantity.set(0);
        self.minimum_level.set(DEFAULT_MINIMUM_LEVEL);
        self.unit.set(DEFAULT_UNIT.to_string());
    }

    pub fn to_request(&self) -> NewMaterial {
        let unit = self.unit.get();
        NewMaterial {
            name: self.name.get().trim().to_string(),
            quantity: self.quantity.get().max(0),
            minimum_level: self.minimum_level.get().max(0),
            unit: if unit.trim().is_empty() {
                DEFAULT_UNIT.to_string()
            } else {
                unit.trim().to_string()
            },
        }
    }
}
