//! Localization catalog for schedule and booking labels
//!
//! One static table keyed by message id, looked up per string. There is no
//! pluralization or ICU formatting, the UI never needed it.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Supported display locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Tr,
    De,
}

impl Locale {
    /// Parse a locale code, defaulting to English when unrecognized
    pub fn from_code(code: &str) -> Self {
        match code {
            "tr" => Locale::Tr,
            "de" => Locale::De,
            _ => Locale::En,
        }
    }

    /// The wire code for this locale
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Tr => "tr",
            Locale::De => "de",
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

/// Identifier of a translatable string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageId {
    Available,
    Booked,
    StatusConfirmed,
    StatusPending,
    StatusCancelled,
    Today,
    PreviousWeek,
    NextWeek,
    Customer,
    Phone,
    Service,
    Worker,
    Status,
    Close,
    UnknownCustomer,
    UnknownService,
}

/// Look up a message in the catalog
pub fn text(locale: Locale, id: MessageId) -> &'static str {
    use Locale::*;
    use MessageId::*;

    match id {
        Available => match locale {
            En => "Available",
            Tr => "Müsait",
            De => "Verfügbar",
        },
        Booked => match locale {
            En => "Booked",
            Tr => "Dolu",
            De => "Belegt",
        },
        StatusConfirmed => match locale {
            En => "Confirmed",
            Tr => "Onaylandı",
            De => "Bestätigt",
        },
        StatusPending => match locale {
            En => "Pending",
            Tr => "Beklemede",
            De => "Ausstehend",
        },
        StatusCancelled => match locale {
            En => "Cancelled",
            Tr => "İptal edildi",
            De => "Storniert",
        },
        Today => match locale {
            En => "Today",
            Tr => "Bugün",
            De => "Heute",
        },
        PreviousWeek => match locale {
            En => "Previous week",
            Tr => "Önceki hafta",
            De => "Vorherige Woche",
        },
        NextWeek => match locale {
            En => "Next week",
            Tr => "Sonraki hafta",
            De => "Nächste Woche",
        },
        Customer => match locale {
            En => "Customer",
            Tr => "Müşteri",
            De => "Kunde",
        },
        Phone => match locale {
            En => "Phone",
            Tr => "Telefon",
            De => "Telefon",
        },
        Service => match locale {
            En => "Service",
            Tr => "Hizmet",
            De => "Leistung",
        },
        Worker => match locale {
            En => "Staff",
            Tr => "Personel",
            De => "Mitarbeiter",
        },
        Status => match locale {
            En => "Status",
            Tr => "Durum",
            De => "Status",
        },
        Close => match locale {
            En => "Close",
            Tr => "Kapat",
            De => "Schließen",
        },
        UnknownCustomer => match locale {
            En => "Guest",
            Tr => "Misafir",
            De => "Gast",
        },
        UnknownService => match locale {
            En => "Service",
            Tr => "Hizmet",
            De => "Leistung",
        },
    }
}

/// Localized short day name for a weekday
pub fn day_name(locale: Locale, weekday: Weekday) -> &'static str {
    use Locale::*;
    use Weekday::*;

    match weekday {
        Mon => match locale {
            En => "Mon",
            Tr => "Pzt",
            De => "Mo",
        },
        Tue => match locale {
            En => "Tue",
            Tr => "Sal",
            De => "Di",
        },
        Wed => match locale {
            En => "Wed",
            Tr => "Çar",
            De => "Mi",
        },
        Thu => match locale {
            En => "Thu",
            Tr => "Per",
            De => "Do",
        },
        Fri => match locale {
            En => "Fri",
            Tr => "Cum",
            De => "Fr",
        },
        Sat => match locale {
            En => "Sat",
            Tr => "Cmt",
            De => "Sa",
        },
        Sun => match locale {
            En => "Sun",
            Tr => "Paz",
            De => "So",
        },
    }
}
