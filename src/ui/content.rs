//! Static page copy.

pub const HERO_BADGE: &str = "Mobile App Storage Hub";
pub const HERO_TITLE: &str = "Learn More with the";
pub const HERO_PRODUCT: &str = "ACES Mobile App";

pub const CARD_HEADING: &str = "Download Now";

pub const BENEFITS: [&str; 3] = [
    "Personalized Learning Reminders",
    "Academic and Tech Learning Resources",
    "Class Reminders",
];

pub const INSTRUCTIONS_TITLE: &str = "Android Installation Steps:";

pub const INSTRUCTION_STEPS: [&str; 5] = [
    "Open Settings → Security & Privacy",
    "Enable \"Install Unknown Apps\" for your browser",
    "Open the downloaded ACES app file",
    "Tap \"Install\" and follow the prompts",
    "Launch ACES Uniben App!",
];

pub const SECURITY_NOTE: &str = "Only install APKs from trusted sources. ACES Mobile App is safe \
and designed to protect your healthcare data.";

pub const SUCCESS_TITLE: &str = "Download completed successfully!";
pub const SUCCESS_HINT: &str = "Check your Downloads folder and follow the installation steps.";

pub const FOOTER: &str = "ACES Mobile App • aces-mobile-app.apk • Secure & Trusted";

pub const CTA_TITLE: &str = "Download now and enjoy the benefits that come with ACES";
pub const CTA_CREDIT: &str = "Developed with ♥ by sabiDevs";
