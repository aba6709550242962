//! Closed vocabularies accepted by the yield models.
//!
//! The names match the categories the models were trained on, after
//! trimming surrounding whitespace.

/// State used when a request omits `State`.
pub const DEFAULT_STATE: &str = "Odisha";

/// Crop routed to the dedicated coconut model (compared case-insensitively).
pub const COCONUT: &str = "Coconut";

/// Accepted values for `Season`.
pub const SEASONS: &[&str] = &["Kharif", "Rabi", "Whole Year", "Summer", "Winter", "Autumn"];

/// Accepted values for `Crop`.
pub const CROPS: &[&str] = &[
    "Arecanut",
    "Arhar/Tur",
    "Bajra",
    "Banana",
    "Barley",
    "Black pepper",
    "Cardamom",
    "Cashewnut",
    "Castor seed",
    "Coconut",
    "Coriander",
    "Cotton(lint)",
    "Cowpea(Lobia)",
    "Dry chillies",
    "Garlic",
    "Ginger",
    "Gram",
    "Groundnut",
    "Guar seed",
    "Horse-gram",
    "Jowar",
    "Jute",
    "Khesari",
    "Linseed",
    "Maize",
    "Masoor",
    "Mesta",
    "Moong(Green Gram)",
    "Moth",
    "Niger seed",
    "Oilseeds total",
    "Onion",
    "Other Rabi pulses",
    "Other Cereals",
    "Other Kharif pulses",
    "Other Summer Pulses",
    "Peas & beans (Pulses)",
    "Potato",
    "Ragi",
    "Rapeseed &Mustard",
    "Rice",
    "Safflower",
    "Sannhamp",
    "Sesamum",
    "Small millets",
    "Soyabean",
    "Sugarcane",
    "Sunflower",
    "Sweet potato",
    "Tapioca",
    "Tobacco",
    "Turmeric",
    "Urad",
    "Wheat",
    "other oilseeds",
];

/// True when `crop` selects the coconut model, ignoring case and padding.
pub fn is_coconut(crop: &str) -> bool {
    crop.trim().eq_ignore_ascii_case(COCONUT)
}

/// Exact, case-sensitive membership in [`SEASONS`].
pub fn is_known_season(season: &str) -> bool {
    SEASONS.contains(&season)
}

/// Exact, case-sensitive membership in [`CROPS`], except that coconut is
/// accepted in any case since it is dispatched case-insensitively.
pub fn is_known_crop(crop: &str) -> bool {
    CROPS.contains(&crop) || is_coconut(crop)
}
