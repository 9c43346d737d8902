use bimap::BiMap;
use once_cell::sync::Lazy;

// Well-known cells of the Hack address space.
pub const SP: u16 = 0;
pub const LCL: u16 = 1;
pub const ARG: u16 = 2;
pub const THIS: u16 = 3;
pub const THAT: u16 = 4;
pub const TEMP_BASE: u16 = 5;
pub const R13: u16 = 13;
pub const R14: u16 = 14;
pub const SCREEN: u16 = 16384;
pub const KBD: u16 = 24576;

/// First register handed out to implicitly declared variables.
pub const VAR_BASE: u16 = 16;
/// Initial stack pointer value set by the bootstrap block.
pub const STACK_BASE: u16 = 256;

/// The 23 symbols every assembler run starts with.
pub const PREDEFINED: [(&str, u16); 23] = [
    ("SP", 0),
    ("LCL", 1),
    ("ARG", 2),
    ("THIS", 3),
    ("THAT", 4),
    ("R0", 0),
    ("R1", 1),
    ("R2", 2),
    ("R3", 3),
    ("R4", 4),
    ("R5", 5),
    ("R6", 6),
    ("R7", 7),
    ("R8", 8),
    ("R9", 9),
    ("R10", 10),
    ("R11", 11),
    ("R12", 12),
    ("R13", 13),
    ("R14", 14),
    ("R15", 15),
    ("SCREEN", SCREEN),
    ("KBD", KBD),
];

/// Canonical display name per well-known address. The pointer names win
/// over their R-aliases so listings read `@SP`, not `@R0`.
pub static CANONICAL: Lazy<BiMap<&'static str, u16>> = Lazy::new(|| {
    let mut map = BiMap::new();
    map.insert("SP", SP);
    map.insert("LCL", LCL);
    map.insert("ARG", ARG);
    map.insert("THIS", THIS);
    map.insert("THAT", THAT);
    for (name, addr) in [
        ("R5", 5),
        ("R6", 6),
        ("R7", 7),
        ("R8", 8),
        ("R9", 9),
        ("R10", 10),
        ("R11", 11),
        ("R12", 12),
        ("R13", R13),
        ("R14", R14),
        ("R15", 15),
    ] {
        map.insert(name, addr);
    }
    map.insert("SCREEN", SCREEN);
    map.insert("KBD", KBD);
    map
});

#[test]
fn test() {
    assert_eq!(CANONICAL.get_by_right(&0), Some(&"SP"));
    assert_eq!(CANONICAL.get_by_right(&13), Some(&"R13"));
    assert_eq!(CANONICAL.get_by_left(&"KBD"), Some(&KBD));
    assert_eq!(PREDEFINED.len(), 23);
}
