fn main() {
    // sqlx::migrate! embeds the migration files at compile time
    println!("cargo:rerun-if-changed=migrations");

    // Templates and static assets are embedded too
    println!("cargo:rerun-if-changed=templates");
    println!("cargo:rerun-if-changed=static");
}
