fn main() {
    // ESP-IDF link args and cfgs are only needed when building the firmware.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
