pub mod calendar;
pub mod hijri;
pub mod location;
pub mod prayer;
pub mod qibla;
pub mod zakat;

pub use calendar::{IslamicEvent, StatusCheck};
pub use hijri::HijriDate;
pub use location::{City, GeoCoordinate};
pub use prayer::{PrayerCacheRecord, PrayerTimeSet, PrayerTimes, PrayerType};
pub use qibla::QiblaResult;
pub use zakat::{WealthAssessment, ZakatResult};
