//! Real Paris locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. All of these sit within a few
//! kilometers of the city center, so a 10 km radius around Notre-Dame
//! keeps every one of them.

use itinerary_planner::poi::{Coordinate, Poi};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn poi(&self, category: &str) -> Poi {
        Poi::new(self.name, self.coordinate(), category)
    }
}

/// City-center reference point (Place de l'Hôtel de Ville).
pub const REFERENCE: Location = Location::new("Hôtel de Ville", 48.8565, 2.3524);

// ============================================================================
// Monuments
// ============================================================================

pub const MONUMENTS: &[Location] = &[
    Location::new("Tour Eiffel", 48.8584, 2.2945),
    Location::new("Arc de Triomphe", 48.8738, 2.2950),
    Location::new("Cathédrale Notre-Dame", 48.8530, 2.3499),
    Location::new("Sacré-Cœur", 48.8867, 2.3431),
    Location::new("Panthéon", 48.8462, 2.3464),
    Location::new("Sainte-Chapelle", 48.8554, 2.3451),
    Location::new("Hôtel des Invalides", 48.8560, 2.3126),
    Location::new("Opéra Garnier", 48.8719, 2.3316),
    Location::new("Place de la Concorde", 48.8656, 2.3212),
];

// ============================================================================
// Museums
// ============================================================================

pub const MUSEUMS: &[Location] = &[
    Location::new("Musée du Louvre", 48.8606, 2.3376),
    Location::new("Musée d'Orsay", 48.8600, 2.3266),
    Location::new("Centre Pompidou", 48.8607, 2.3522),
    Location::new("Musée Rodin", 48.8553, 2.3158),
    Location::new("Musée de l'Orangerie", 48.8638, 2.3226),
];

// ============================================================================
// Parks
// ============================================================================

pub const PARKS: &[Location] = &[
    Location::new("Jardin du Luxembourg", 48.8462, 2.3372),
    Location::new("Jardin des Tuileries", 48.8635, 2.3275),
    Location::new("Parc des Buttes-Chaumont", 48.8809, 2.3828),
    Location::new("Parc Monceau", 48.8796, 2.3093),
];

/// All fixture POIs with their category tags.
pub fn all_pois() -> Vec<Poi> {
    let mut pois = Vec::new();
    pois.extend(MONUMENTS.iter().map(|l| l.poi("Monument")));
    pois.extend(MUSEUMS.iter().map(|l| l.poi("Museum")));
    pois.extend(PARKS.iter().map(|l| l.poi("Park")));
    pois
}
