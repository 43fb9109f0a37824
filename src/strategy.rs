//! # Strategy Pattern
//!
//! A family of interchangeable algorithms behind one trait. Instead of a
//! `Vehicle -> FourWheeler -> Car -> AutoCar` hierarchy that duplicates the
//! start-up sequence at every level, a vehicle *has* a transmission and the
//! sequence lives in exactly one place.

pub trait Transmission {
    fn start(&self) -> Vec<&'static str>;
    fn name(&self) -> &'static str;
}

pub struct ManualTransmission;
impl Transmission for ManualTransmission {
    fn start(&self) -> Vec<&'static str> {
        vec!["Key in", "Clutch in", "Gear 1", "Accelerating"]
    }

    fn name(&self) -> &'static str {
        "manual"
    }
}

pub struct AutoTransmission;
impl Transmission for AutoTransmission {
    fn start(&self) -> Vec<&'static str> {
        vec!["Key in", "Accelerating"]
    }

    fn name(&self) -> &'static str {
        "auto"
    }
}

pub struct Vehicle {
    tires: u8,
    transmission: Box<dyn Transmission>,
}

impl Vehicle {
    pub fn four_wheeler(transmission: Box<dyn Transmission>) -> Self {
        Self {
            tires: 4,
            transmission,
        }
    }

    pub fn two_wheeler(transmission: Box<dyn Transmission>) -> Self {
        Self {
            tires: 2,
            transmission,
        }
    }

    pub fn tires(&self) -> u8 {
        self.tires
    }

    pub fn transmission_name(&self) -> &'static str {
        self.transmission.name()
    }

    pub fn set_transmission(&mut self, transmission: Box<dyn Transmission>) {
        self.transmission = transmission;
    }

    pub fn start(&self) -> Vec<&'static str> {
        self.transmission.start()
    }
}

/// Runs the demo and returns its console lines.
pub fn run() -> Vec<String> {
    let fleet = [
        ("Car", Vehicle::four_wheeler(Box::new(ManualTransmission))),
        ("Auto car", Vehicle::four_wheeler(Box::new(AutoTransmission))),
        ("Motorcycle", Vehicle::two_wheeler(Box::new(ManualTransmission))),
        ("Scooty", Vehicle::two_wheeler(Box::new(AutoTransmission))),
    ];

    let mut lines = Vec::new();
    for (label, vehicle) in &fleet {
        lines.push(format!(
            "{} ({} tires, {} transmission):",
            label,
            vehicle.tires(),
            vehicle.transmission_name()
        ));
        lines.extend(vehicle.start().into_iter().map(|step| format!("  {}", step)));
    }
    lines
}
