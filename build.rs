use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug)]
enum GetOneError {
    None,
    Multiple,
}

trait IteratorExt: Iterator {
    fn get_one(self) -> Result<Self::Item, GetOneError>;
}

impl<T: Iterator> IteratorExt for T {
    fn get_one(mut self) -> Result<Self::Item, GetOneError> {
        match (self.next(), self.next()) {
            (Some(res), None) => Ok(res),
            (None, _) => Err(GetOneError::None),
            _ => Err(GetOneError::Multiple),
        }
    }
}

const BOARDS: &[&str] = &["BLUE_PILL"];

fn main() {
    println!("cargo:rustc-check-cfg=cfg(board_spi_pins)");
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    match env::vars()
        .map(|(a, _)| a)
        .filter(|x| {
            x.strip_prefix("CARGO_FEATURE_")
                .map_or(false, |f| BOARDS.contains(&f))
        })
        .get_one()
    {
        Ok(_) => println!("cargo:rustc-cfg=board_spi_pins"),
        Err(GetOneError::None) => {
            println!("cargo:warning=spi-dma requires a board with SPI pins")
        }
        Err(GetOneError::Multiple) => panic!("Multiple board Cargo features enabled"),
    }

    // Only the firmware link needs the memory layout.
    if env::var("TARGET").map_or(false, |t| t.starts_with("thumb")) {
        let out = PathBuf::from(env::var_os("OUT_DIR").unwrap());
        fs::copy("memory.x", out.join("memory.x")).unwrap();
        println!("cargo:rustc-link-search={}", out.display());
    }
}
