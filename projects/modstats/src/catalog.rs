/// A Thunderstore package tracked by the poller.
#[derive(Debug, Clone)]
pub struct TrackedPackage {
    pub display_name: &'static str,
    pub namespace: &'static str,
    pub name: &'static str,
}

pub const TRACKED_PACKAGES: &[TrackedPackage] = &[
    TrackedPackage {
        display_name: "Better Shotgun Tooltip",
        namespace: "AtomicStudio",
        name: "Better_Shotgun_Tooltip",
    },
    TrackedPackage {
        display_name: "Moved Magnet Switch",
        namespace: "AtomicStudio",
        name: "Moved_Magnet_Switch",
    },
    TrackedPackage {
        display_name: "Atomics Cosmetics",
        namespace: "AtomicStudio",
        name: "Atomics_Cosmetics",
    },
    TrackedPackage {
        display_name: "Colorable CozyLights",
        namespace: "AtomicStudio",
        name: "Colorable_CozyLights",
    },
    TrackedPackage {
        display_name: "Atomics Suits",
        namespace: "AtomicStudio",
        name: "Atomics_Suits",
    },
    TrackedPackage {
        display_name: "Breakable Windows",
        namespace: "AtomicStudio",
        name: "Breakable_Windows",
    },
    TrackedPackage {
        display_name: "Charging Divebell",
        namespace: "AtomicStudio",
        name: "Charging_Divebell",
    },
    TrackedPackage {
        display_name: "Toilet Paper Valuables",
        namespace: "AtomicStudio",
        name: "Toilet_Paper_Valuables",
    },
    TrackedPackage {
        display_name: "Speedy Escalators",
        namespace: "AtomicStudio",
        name: "Speedy_Escalators",
    },
];

/// Steam Workshop published-file ids fetched in one batched GetDetails call.
pub const WORKSHOP_IDS: &[&str] = &[
    "3383270520",
    "3383837077",
    "3385201967",
    "3385250537",
    "3386220143",
    "3386777900",
    "3389296239",
    "3400376437",
];
