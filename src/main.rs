use pubiri::{
    decode_international_hostname, decode_percent_escapes, encode_international_hostname,
    encode_unicode_bytes, encode_uri_component, Iri,
};

fn main() {
    println!("pubiri identifier walkthrough");
    println!("=============================");

    // Constructing identifiers each way
    println!("\n1. Construction:");

    let mut chapter = Iri::from_parts("epub3", "example.com", "OPS/chapter1.xhtml", "", "");
    println!("  from parts:   {}", chapter.display_string());

    let isbn = Iri::from_urn("isbn", "0451450523");
    println!("  from URN:     {}", isbn.canonical_string());

    let raw = Iri::parse("https://bücher.de/katalog?seite=2");
    println!("  from text:    {}", raw.display_string());
    println!("  canonical:    {}", raw.canonical_string());

    // Mutation keeps the display form in step where it can
    println!("\n2. Mutation:");

    match chapter.add_path_component("section2") {
        Ok(()) => println!("  + path:       {}", chapter.display_string()),
        Err(e) => println!("  ✗ path: {}", e),
    }
    match chapter.set_fragment("para5") {
        Ok(()) => println!("  + fragment:   {}", chapter.display_string()),
        Err(e) => println!("  ✗ fragment: {}", e),
    }

    // Host replacement invalidates the cache; the display form is then
    // reconstructed from the canonical string with the host IDN-decoded
    let mut shelf = Iri::parse("https://bücher.de/regal");
    if let Err(e) = shelf.set_host("bibliothèque.fr") {
        println!("  ✗ host: {}", e);
    }
    println!("  new host:     {}", shelf.display_string());
    println!("  canonical:    {}", shelf.canonical_string());

    // Codec transforms
    println!("\n3. Codec:");
    println!("  component:    {}", encode_uri_component("a/b?c=déjà"));
    println!("  UTF-8 bytes:  {}", encode_unicode_bytes("café"));
    println!("  decoded:      {}", decode_percent_escapes("caf%C3%A9"));
    println!("  IDN encode:   {}", encode_international_hostname("bücher.de"));
    println!("  IDN decode:   {}", decode_international_hostname("xn--bcher-kva.de"));

    // Equality rules
    println!("\n4. Equality:");
    let a = Iri::from_urn("isbn", "0451450523");
    let b = Iri::parse("urn:isbn:0451450523");
    println!("  URN == URN:           {}", a == Iri::from_urn("isbn", "0451450523"));
    println!("  URN == parsed text:   {} (forms differ by design)", a == b);
}
