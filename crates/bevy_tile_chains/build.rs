fn main() {
  // `physics` is set when a collider backend is compiled in, so chain
  // collider code can use `#[cfg(physics)]` instead of listing both features.
  println!("cargo:rustc-check-cfg=cfg(physics)");
  let avian = std::env::var_os("CARGO_FEATURE_AVIAN2D").is_some();
  let rapier = std::env::var_os("CARGO_FEATURE_RAPIER2D").is_some();
  if avian || rapier {
    println!("cargo:rustc-cfg=physics");
  }
}
