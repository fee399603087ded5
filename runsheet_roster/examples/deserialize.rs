use runsheet_roster::clients::SampleClient;
use runsheet_rs::RosterKind;

fn main() {
    let roster = runsheet_roster::load(&mut SampleClient).unwrap();
    for kind in RosterKind::ALL {
        println!("[{}]", kind.table_name());
        for candidate in roster.candidates(kind) {
            println!("{:?}", candidate);
        }
    }
}
