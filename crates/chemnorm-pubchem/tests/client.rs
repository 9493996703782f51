//! HTTP behavior of the PubChem client against a local canned server.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use chemnorm_map::{AggregateError, Aggregator, DiagnosticKind, RemoteResolver};
use chemnorm_pubchem::{PubChemClient, PubChemConfig, PubChemError};

const ADENOCARD_PATH: &str =
    "/rest/pug/compound/name/Adenocard/property/MolecularWeight,IsomericSMILES,XLogP/JSON";
const ADENOSINE_SYNONYMS_PATH: &str = "/rest/pug/compound/cid/60961/synonyms/JSON";

const ADENOCARD_PROPERTIES: &str = r#"{"PropertyTable":{"Properties":[
    {"CID":60961,"MolecularWeight":"267.24","IsomericSMILES":"CCO","XLogP":-1.1}
]}}"#;
const ADENOSINE_SYNONYMS: &str =
    r#"{"InformationList":{"Information":[{"CID":60961,"Synonym":["adenosine","Adenocard"]}]}}"#;

struct Canned {
    status: u16,
    headers: Vec<(&'static str, &'static str)>,
    body: &'static str,
}

fn ok(body: &'static str) -> Canned {
    Canned {
        status: 200,
        headers: Vec::new(),
        body,
    }
}

fn status(status: u16, body: &'static str) -> Canned {
    Canned {
        status,
        headers: Vec::new(),
        body,
    }
}

/// Serves `routes` by request path; unknown paths get a PUG-style 404.
fn serve(routes: Vec<(&'static str, Canned)>) -> PubChemClient {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let routes: HashMap<&'static str, Canned> = routes.into_iter().collect();
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { continue };
            respond(stream, &routes);
        }
    });
    let config = PubChemConfig::default().with_base_url(format!("http://{addr}/rest/pug"));
    PubChemClient::new(config).expect("create client")
}

fn respond(mut stream: TcpStream, routes: &HashMap<&'static str, Canned>) {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) if line == "\r\n" => break,
            Ok(_) => {}
        }
    }
    let path = request_line.split_whitespace().nth(1).unwrap_or_default();
    let not_found = status(
        404,
        r#"{"Fault":{"Code":"PUGREST.NotFound","Message":"No CID found"}}"#,
    );
    let canned = routes.get(path).unwrap_or(&not_found);

    let mut response = format!(
        "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
        canned.status,
        canned.body.len()
    );
    for (name, value) in &canned.headers {
        response.push_str(&format!("{name}: {value}\r\n"));
    }
    response.push_str("\r\n");
    response.push_str(canned.body);
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[test]
fn unknown_name_yields_no_records() {
    let client = serve(Vec::new());
    assert!(client.find_compounds("unknownX").unwrap().is_empty());

    let outcome = Aggregator::new(RemoteResolver::new(&client))
        .process(["unknownX"])
        .unwrap();
    assert!(outcome.mapping.is_empty());
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::NotFound);
}

#[test]
fn missing_synonyms_are_a_malformed_record() {
    let client = serve(vec![(ADENOCARD_PATH, ok(ADENOCARD_PROPERTIES))]);
    let records = client.find_compounds("Adenocard").unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].synonyms.is_empty());

    let outcome = Aggregator::new(RemoteResolver::new(&client))
        .process(["Adenocard"])
        .unwrap();
    assert!(outcome.mapping.is_empty());
    assert!(outcome.records.is_empty());
    assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::MalformedRecord);
}

#[test]
fn busy_service_is_rate_limited() {
    let client = serve(vec![
        (
            ADENOCARD_PATH,
            Canned {
                status: 503,
                headers: vec![("Retry-After", "7")],
                body: "",
            },
        ),
        (
            "/rest/pug/compound/name/ibrutinib/property/MolecularWeight,IsomericSMILES,XLogP/JSON",
            status(429, ""),
        ),
    ]);

    let err = client.find_compounds("Adenocard").unwrap_err();
    assert!(matches!(
        err,
        PubChemError::RateLimited {
            retry_after_secs: 7
        }
    ));
    let err = client.find_compounds("ibrutinib").unwrap_err();
    assert!(matches!(
        err,
        PubChemError::RateLimited {
            retry_after_secs: 60
        }
    ));

    let err = Aggregator::new(RemoteResolver::new(&client))
        .process(["Adenocard"])
        .unwrap_err();
    assert!(matches!(
        err,
        AggregateError::SourceUnavailable { index: 0, .. }
    ));
}

#[test]
fn fault_body_becomes_api_error() {
    let client = serve(vec![(
        ADENOCARD_PATH,
        status(
            400,
            r#"{"Fault":{"Code":"PUGREST.BadRequest","Message":"Invalid input"}}"#,
        ),
    )]);
    match client.find_compounds("Adenocard").unwrap_err() {
        PubChemError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "PUGREST.BadRequest: Invalid input");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn resolves_and_enriches_through_the_aggregator() {
    let client = serve(vec![
        (ADENOCARD_PATH, ok(ADENOCARD_PROPERTIES)),
        (ADENOSINE_SYNONYMS_PATH, ok(ADENOSINE_SYNONYMS)),
    ]);
    let outcome = Aggregator::new(RemoteResolver::new(&client))
        .process(["Adenocard", "Adenocard"])
        .unwrap();

    assert_eq!(
        outcome.mapping.pairs(),
        vec![("Adenocard", "ADENOSINE"), ("Adenocard", "ADENOSINE")]
    );
    assert_eq!(outcome.records.len(), 1);
    let record = &outcome.records[0];
    assert_eq!(record.canonical_form.as_str(), "ADENOSINE");
    assert_eq!(record.molecular_weight, Some(267.24));
    assert_eq!(record.structural_descriptor.as_deref(), Some("CCO"));
    assert_eq!(record.hydrophobicity, Some(-1.1));
    assert!(outcome.diagnostics.is_empty());
}
