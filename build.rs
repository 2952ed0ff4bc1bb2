fn main() {
    // cfg.toml の変更時に再ビルド
    println!("cargo:rerun-if-changed=cfg.toml");

    #[cfg(feature = "esp")]
    embuild::espidf::sysenv::output();
}
