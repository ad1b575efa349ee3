/// Display version information
pub fn display_version() {
    println!("txdb-stats v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Descriptive statistics for transactional databases.");
}
