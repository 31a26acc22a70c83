use ogaget_format::layout::{FOOTER_KEYS, HEADER_KEYS};

pub fn run() {
    for key in HEADER_KEYS.iter().chain(FOOTER_KEYS) {
        println!("{}", key);
    }
}
