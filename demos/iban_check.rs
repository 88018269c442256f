use zahlung::core::*;

fn main() {
    for input in [
        "DE89 3704 0044 0532 0130 00",
        "DE89370400440532013001",
        "gb82west12345698765432",
        "XX00123",
    ] {
        match validate_iban(input) {
            Ok(iban) => println!("{input:<30} valid   {}", iban.formatted()),
            Err(e) => println!("{input:<30} invalid {e}"),
        }
    }

    println!();
    for input in ["COBADEFF", "COBADEFFXXX", "COBA", "CITIUS33"] {
        match validate_bic(input) {
            Ok(bic) => println!("{input:<12} valid   branch {}", bic.branch_code()),
            Err(e) => println!("{input:<12} invalid {e}"),
        }
    }

    println!();
    match construct_german_iban("37040044", "532013000") {
        Ok(iban) => println!("BLZ 37040044 / Konto 532013000 -> {}", iban.formatted()),
        Err(e) => println!("cannot derive IBAN: {e}"),
    }
}
