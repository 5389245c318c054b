//! Offline part data used when no distributor credentials are configured.
//!
//! The table is an ordered slice so that partial-key lookups resolve the
//! same way on every run.

use async_trait::async_trait;
use partscout_core::{ComponentAvailability, ComponentGrade, Distributor, PriceBreak, SearchFilters};

use crate::error::DistributorError;
use crate::source::PartSource;

struct FixturePart {
    mpn: &'static str,
    manufacturer: &'static str,
    description: &'static str,
    stock: u64,
    price_breaks: &'static [(u64, f64)],
    package: &'static str,
    grade: ComponentGrade,
    temp_min: f64,
    temp_max: f64,
    datasheet: Option<&'static str>,
    specs: &'static [(&'static str, &'static str)],
}

struct FixtureEntry {
    key: &'static str,
    mouser: Option<FixturePart>,
    digikey: Option<FixturePart>,
}

impl FixtureEntry {
    fn part(&self, distributor: Distributor) -> Option<&FixturePart> {
        match distributor {
            Distributor::Mouser => self.mouser.as_ref(),
            Distributor::DigiKey => self.digikey.as_ref(),
        }
    }
}

static FIXTURES: &[FixtureEntry] = &[
    FixtureEntry {
        key: "LM2596",
        mouser: Some(FixturePart {
            mpn: "LM2596S-ADJ/NOPB",
            manufacturer: "Texas Instruments",
            description: "Switching Voltage Regulators SIMPLE SWITCHER 3A Step-Down Voltage Regulator",
            stock: 2145,
            price_breaks: &[(1, 3.10), (10, 2.89), (100, 2.62), (1000, 2.38)],
            package: "TO-263",
            grade: ComponentGrade::Commercial,
            temp_min: 0.0,
            temp_max: 70.0,
            datasheet: Some("https://www.ti.com/lit/ds/symlink/lm2596.pdf"),
            specs: &[],
        }),
        digikey: Some(FixturePart {
            mpn: "LM2596S-ADJ/NOPB",
            manufacturer: "Texas Instruments",
            description: "IC REG BUCK ADJ 3A TO263-5",
            stock: 1892,
            price_breaks: &[(1, 3.15), (10, 2.93), (100, 2.68)],
            package: "TO-263-5",
            grade: ComponentGrade::Commercial,
            temp_min: 0.0,
            temp_max: 70.0,
            datasheet: None,
            specs: &[],
        }),
    },
    FixtureEntry {
        key: "TPS54360-Q1",
        mouser: Some(FixturePart {
            mpn: "TPS54360-Q1DPWRQ1",
            manufacturer: "Texas Instruments",
            description: "Switching Voltage Regulators 3.5-V to 42-V input, 3.5-A, synchronous buck AEC-Q100",
            stock: 3247,
            price_breaks: &[(1, 2.45), (10, 2.28), (100, 2.08), (1000, 1.89)],
            package: "TO-263",
            grade: ComponentGrade::Automotive,
            temp_min: -40.0,
            temp_max: 125.0,
            datasheet: Some("https://www.ti.com/lit/ds/symlink/tps54360-q1.pdf"),
            specs: &[
                ("AEC-Q100", "Qualified"),
                ("Input Voltage", "3.5V to 42V"),
                ("Output Current", "3.5A"),
                ("Efficiency", "95%"),
            ],
        }),
        digikey: Some(FixturePart {
            mpn: "TPS54360-Q1DPWRQ1",
            manufacturer: "Texas Instruments",
            description: "IC REG BUCK ADJ 3.5A TO263-7 AEC-Q100",
            stock: 5247,
            price_breaks: &[(1, 2.50), (10, 2.32), (100, 2.12)],
            package: "TO-263-7",
            grade: ComponentGrade::Automotive,
            temp_min: -40.0,
            temp_max: 125.0,
            datasheet: None,
            specs: &[],
        }),
    },
    FixtureEntry {
        key: "SI4459BDY",
        mouser: Some(FixturePart {
            mpn: "SI4459BDY-T1-GE3",
            manufacturer: "Vishay Siliconix",
            description: "MOSFET 2P-CH -30V -7A PowerPAK SO-8",
            stock: 1543,
            price_breaks: &[(1, 2.10), (10, 1.95), (100, 1.78)],
            package: "PowerPAK SO-8",
            grade: ComponentGrade::Commercial,
            temp_min: -55.0,
            temp_max: 150.0,
            datasheet: None,
            specs: &[
                ("Voltage", "-30V"),
                ("Current (per channel)", "-7A"),
                ("Channels", "2 (Dual)"),
                ("Rds(on)", "0.017Ω @ -10V"),
            ],
        }),
        digikey: None,
    },
    FixtureEntry {
        key: "SI4435BDY",
        mouser: Some(FixturePart {
            mpn: "Si4435BDY-T1-GE3",
            manufacturer: "Vishay Siliconix",
            description: "MOSFET P-CH -40V -14A PowerPAK SO-8",
            stock: 1247,
            price_breaks: &[(1, 2.45), (10, 2.28), (100, 2.08)],
            package: "PowerPAK SO-8",
            grade: ComponentGrade::Commercial,
            temp_min: -55.0,
            temp_max: 150.0,
            datasheet: Some("https://www.vishay.com/docs/63734/si4435bdy.pdf"),
            specs: &[
                ("Voltage", "-40V"),
                ("Current", "-14A"),
                ("Channels", "1 (Single)"),
                ("Rds(on)", "0.0085Ω @ -10V"),
            ],
        }),
        digikey: Some(FixturePart {
            mpn: "Si4435BDY-T1-GE3",
            manufacturer: "Vishay Siliconix",
            description: "MOSFET P-CH -40V -14A 8SO",
            stock: 892,
            price_breaks: &[(1, 2.50), (10, 2.33), (100, 2.13)],
            package: "PowerPAK SO-8",
            grade: ComponentGrade::Commercial,
            temp_min: -55.0,
            temp_max: 150.0,
            datasheet: None,
            specs: &[],
        }),
    },
    FixtureEntry {
        key: "STM32F407VGT6",
        mouser: Some(FixturePart {
            mpn: "STM32F407VGT6",
            manufacturer: "STMicroelectronics",
            description: "ARM Microcontrollers - MCU High-performance 1MB Flash 168MHz CPU",
            stock: 2845,
            price_breaks: &[(1, 10.50), (10, 9.80), (100, 8.95)],
            package: "LQFP-100",
            grade: ComponentGrade::Industrial,
            temp_min: -40.0,
            temp_max: 85.0,
            datasheet: None,
            specs: &[],
        }),
        digikey: Some(FixturePart {
            mpn: "STM32F407VGT6",
            manufacturer: "STMicroelectronics",
            description: "IC MCU 32BIT 1MB FLASH 100LQFP",
            stock: 1245,
            price_breaks: &[(1, 10.85), (10, 10.12), (100, 9.24)],
            package: "LQFP-100",
            grade: ComponentGrade::Industrial,
            temp_min: -40.0,
            temp_max: 85.0,
            datasheet: None,
            specs: &[],
        }),
    },
    FixtureEntry {
        key: "RC0603FR-0710KL",
        mouser: Some(FixturePart {
            mpn: "RC0603FR-0710KL",
            manufacturer: "Yageo",
            description: "Thick Film Resistors - SMD 10kOhm 1% 1/10W",
            stock: 15420,
            price_breaks: &[(1, 0.10), (10, 0.012), (100, 0.004), (1000, 0.002)],
            package: "0603",
            grade: ComponentGrade::Commercial,
            temp_min: -55.0,
            temp_max: 155.0,
            datasheet: None,
            specs: &[],
        }),
        digikey: None,
    },
    FixtureEntry {
        key: "CL10B104KB8NNNC",
        mouser: Some(FixturePart {
            mpn: "CL10B104KB8NNNC",
            manufacturer: "Samsung Electro-Mechanics",
            description: "Multilayer Ceramic Capacitors MLCC - SMD/SMT 0.1uF 50V X7R 0603",
            stock: 8943,
            price_breaks: &[(1, 0.10), (10, 0.015), (100, 0.006), (1000, 0.003)],
            package: "0603",
            grade: ComponentGrade::Commercial,
            temp_min: -55.0,
            temp_max: 125.0,
            datasheet: None,
            specs: &[],
        }),
        digikey: None,
    },
];

/// Cross-reference used by [`FixtureSource::suggest_alternatives`]:
/// an MPN containing the pattern maps to the listed replacement.
static ALTERNATIVES: &[(&str, &str)] = &[("LM2596", "TPS54360-Q1"), ("SI4459", "SI4435BDY")];

fn lookup(mpn: &str, distributor: Distributor) -> Option<&'static FixturePart> {
    let upper = mpn.trim().to_uppercase();
    if upper.is_empty() {
        return None;
    }
    let key = upper.split('-').next().unwrap_or(&upper);

    if let Some(part) = FIXTURES
        .iter()
        .find(|entry| entry.key == key)
        .and_then(|entry| entry.part(distributor))
    {
        return Some(part);
    }

    FIXTURES
        .iter()
        .filter(|entry| upper.contains(entry.key) || entry.key.contains(upper.as_str()))
        .find_map(|entry| entry.part(distributor))
}

fn to_availability(part: &FixturePart, distributor: Distributor) -> ComponentAvailability {
    let mut component =
        ComponentAvailability::new(part.mpn, part.manufacturer, part.description, distributor);
    component.stock = part.stock;
    component.price_breaks = part
        .price_breaks
        .iter()
        .map(|&(quantity, price)| PriceBreak::usd(quantity, price))
        .collect();
    component.package = Some(part.package.to_owned());
    component.grade = part.grade;
    component.set_temperature_range(Some(part.temp_min), Some(part.temp_max));
    component.datasheet_url = part.datasheet.map(str::to_owned);
    component.specs = part
        .specs
        .iter()
        .map(|&(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
    component
}

/// A [`PartSource`] backed by the built-in fixture table. Never touches the network.
#[derive(Debug, Clone, Copy)]
pub struct FixtureSource {
    distributor: Distributor,
}

impl FixtureSource {
    #[must_use]
    pub fn new(distributor: Distributor) -> Self {
        Self { distributor }
    }
}

#[async_trait]
impl PartSource for FixtureSource {
    fn distributor(&self) -> Distributor {
        self.distributor
    }

    async fn search_by_mpn(
        &self,
        mpn: &str,
    ) -> Result<Option<ComponentAvailability>, DistributorError> {
        let found = lookup(mpn, self.distributor).map(|p| to_availability(p, self.distributor));
        tracing::debug!(
            distributor = %self.distributor,
            mpn,
            found = found.is_some(),
            "fixture lookup"
        );
        Ok(found)
    }

    async fn get_component_details(
        &self,
        part_number: &str,
    ) -> Result<Option<ComponentAvailability>, DistributorError> {
        self.search_by_mpn(part_number).await
    }

    async fn search_by_keyword(
        &self,
        keyword: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<ComponentAvailability>, DistributorError> {
        let needle = keyword.trim().to_lowercase();
        Ok(FIXTURES
            .iter()
            .filter_map(|entry| entry.part(self.distributor))
            .filter(|part| {
                part.mpn.to_lowercase().contains(&needle)
                    || part.description.to_lowercase().contains(&needle)
                    || part.manufacturer.to_lowercase().contains(&needle)
            })
            .map(|part| to_availability(part, self.distributor))
            .filter(|component| filters.matches(component))
            .collect())
    }

    async fn suggest_alternatives(&self, mpn: &str) -> Result<Vec<String>, DistributorError> {
        let upper = mpn.trim().to_uppercase();
        Ok(ALTERNATIVES
            .iter()
            .filter(|(pattern, _)| upper.contains(pattern))
            .map(|(_, alternative)| (*alternative).to_owned())
            .collect())
    }
}
