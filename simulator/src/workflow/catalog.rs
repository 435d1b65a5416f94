/// A track with recorded exports under the data root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackEntry {
    pub id: &'static str,
    /// Folder holding the exports, relative to the data root.
    pub folder: &'static str,
    pub display_name: &'static str,
}

pub const TRACKS: &[TrackEntry] = &[
    TrackEntry {
        id: "barber",
        folder: "barber",
        display_name: "Barber Motorsports Park",
    },
    TrackEntry {
        id: "circuit-of-the-americas",
        folder: "circuit-of-the-americas/COTA",
        display_name: "Circuit of the Americas",
    },
    TrackEntry {
        id: "indianapolis",
        folder: "indianapolis/indianapolis",
        display_name: "Indianapolis Motor Speedway",
    },
    TrackEntry {
        id: "road-america",
        folder: "road-america/Road America",
        display_name: "Road America",
    },
    TrackEntry {
        id: "sebring",
        folder: "sebring/Sebring",
        display_name: "Sebring International Raceway",
    },
    TrackEntry {
        id: "sonoma",
        folder: "sonoma/Sonoma",
        display_name: "Sonoma Raceway",
    },
    TrackEntry {
        id: "virginia-international-raceway",
        folder: "virginia-international-raceway/VIR",
        display_name: "Virginia International Raceway",
    },
];

pub fn find(id: &str) -> Option<&'static TrackEntry> {
    TRACKS.iter().find(|track| track.id == id)
}

pub fn available_tracks() -> Vec<&'static str> {
    TRACKS.iter().map(|track| track.id).collect()
}

/// Display name for a track id; unknown ids are shown as-is.
pub fn display_name(id: &str) -> &str {
    find(id).map_or(id, |track| track.display_name)
}
