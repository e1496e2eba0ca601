mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;

use common::{create_test_app, ids};

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_vehicle_lifecycle() {
    let app = create_test_app();

    let created = app
        .create_vehicle(&[
            ("marque", "Toyota"),
            ("modele", "Corolla"),
            ("prix", "15000"),
            ("type", "stock"),
        ])
        .await;
    let id = created["_id"].as_str().unwrap().to_string();
    assert!(created["dateCreation"].is_string());
    assert_eq!(created["images"], json!([]));

    let (status, fetched) = app.get(&format!("/api/vehicles/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (_, stock) = app.get("/api/vehicles?type=stock").await;
    assert!(ids(&stock).contains(&id));

    let (status, body) = app.delete(&format!("/api/vehicles/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Véhicule supprimé");

    // Segundo borrado: no-op sin error
    let (status, _) = app.delete(&format!("/api/vehicles/{}", id)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get(&format!("/api/vehicles/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_list_filters_and_order() {
    let app = create_test_app();

    let old_toyota = app
        .create_vehicle(&[("marque", "Toyota"), ("modele", "Hilux"), ("prix", "30000")])
        .await;
    app.create_vehicle(&[("marque", "Honda"), ("modele", "Civic"), ("prix", "12000")])
        .await;
    let new_toyota = app
        .create_vehicle(&[
            ("marque", "Toyota"),
            ("modele", "RAV4"),
            ("prix", "28000"),
            ("categorie", "SUV"),
        ])
        .await;
    app.create_vehicle(&[
        ("marque", "Toyota"),
        ("modele", "Supra"),
        ("prix", "55000"),
        ("type", "selection"),
        ("selectionType", "vedettes"),
    ])
    .await;

    let (status, list) = app.get("/api/vehicles?type=stock&marque=Toyota").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ids(&list),
        vec![
            new_toyota["_id"].as_str().unwrap().to_string(),
            old_toyota["_id"].as_str().unwrap().to_string()
        ]
    );

    // "Toutes" y "All" equivalen a no filtrar
    let (_, all) = app.get("/api/vehicles?marque=Toutes&categorie=All").await;
    assert_eq!(ids(&all).len(), 4);
    let (_, unfiltered) = app.get("/api/vehicles").await;
    assert_eq!(ids(&all), ids(&unfiltered));

    let (_, suv) = app.get("/api/vehicles?categorie=SUV").await;
    assert_eq!(ids(&suv), vec![new_toyota["_id"].as_str().unwrap().to_string()]);

    let (_, featured) = app
        .get("/api/vehicles?type=selection&selectionType=vedettes")
        .await;
    assert_eq!(featured.as_array().unwrap().len(), 1);
    assert_eq!(featured[0]["modele"], "Supra");

    let (_, discounted) = app
        .get("/api/vehicles?type=selection&selectionType=soldes")
        .await;
    assert_eq!(discounted, json!([]));
}

#[tokio::test]
async fn test_list_pagination() {
    let app = create_test_app();
    for n in 0..5 {
        let model = format!("Modele {}", n);
        app.create_vehicle(&[("marque", "Kia"), ("modele", model.as_str()), ("prix", "9000")])
            .await;
    }

    let (_, everything) = app.get("/api/vehicles").await;
    let all_ids = ids(&everything);
    assert_eq!(all_ids.len(), 5);

    let (_, page1) = app.get("/api/vehicles?page=1&limit=2").await;
    let (_, page2) = app.get("/api/vehicles?page=2&limit=2").await;
    let (_, page3) = app.get("/api/vehicles?page=3&limit=2").await;
    let (_, page4) = app.get("/api/vehicles?page=4&limit=2").await;

    assert_eq!(ids(&page1), all_ids[0..2]);
    assert_eq!(ids(&page2), all_ids[2..4]);
    assert_eq!(ids(&page3), all_ids[4..5]);
    assert_eq!(page4, json!([]));

    // Tamaño por defecto: 12
    let (_, default_page) = app.get("/api/vehicles?page=1").await;
    assert_eq!(ids(&default_page).len(), 5);
}

#[tokio::test]
async fn test_list_rejects_malformed_filters() {
    let app = create_test_app();

    for uri in [
        "/api/vehicles?type=moto",
        "/api/vehicles?selectionType=promo",
        "/api/vehicles?page=0",
        "/api/vehicles?limit=abc",
        "/api/vehicles?limit=1000",
    ] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_create_validation() {
    let app = create_test_app();

    let (status, _) = app
        .multipart(Method::POST, "/api/vehicles", &[("marque", "Toyota")], &[])
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .multipart(
            Method::POST,
            "/api/vehicles",
            &[("marque", "Toyota"), ("modele", "Yaris"), ("prix", "-1")],
            &[],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .multipart(
            Method::POST,
            "/api/vehicles",
            &[
                ("marque", "Toyota"),
                ("modele", "Yaris"),
                ("prix", "9000"),
                ("type", "selection"),
            ],
            &[],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/api/vehicles/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_features_are_split_and_trimmed() {
    let app = create_test_app();

    let created = app
        .create_vehicle(&[
            ("marque", "Peugeot"),
            ("modele", "3008"),
            ("prix", "21000"),
            ("features", "GPS , Caméra de recul,Sièges chauffants"),
        ])
        .await;
    assert_eq!(
        created["features"],
        json!(["GPS", "Caméra de recul", "Sièges chauffants"])
    );
}

#[tokio::test]
async fn test_update_merges_fields() {
    let app = create_test_app();
    let created = app
        .create_vehicle(&[
            ("marque", "Mercedes"),
            ("modele", "C200"),
            ("prix", "32000"),
            ("annee", "2018"),
            ("kilometrage", "60000"),
            ("carburant", "Diesel"),
        ])
        .await;
    let id = created["_id"].as_str().unwrap();

    let (status, updated) = app
        .multipart(
            Method::PUT,
            &format!("/api/vehicles/{}", id),
            &[("prix", "9999")],
            &[],
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["prix"], 9999.0);

    let mut expected = created.clone();
    expected["prix"] = updated["prix"].clone();
    assert_eq!(updated, expected);

    let (_, fetched) = app.get(&format!("/api/vehicles/{}", id)).await;
    assert_eq!(fetched, updated);

    let (status, _) = app
        .multipart(
            Method::PUT,
            &format!("/api/vehicles/{}", uuid::Uuid::new_v4()),
            &[("prix", "1")],
            &[],
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_images_are_stored_served_and_replaced() {
    let app = create_test_app();

    let (status, created) = app
        .multipart(
            Method::POST,
            "/api/vehicles",
            &[("marque", "BMW"), ("modele", "X5"), ("prix", "45000")],
            &[("front.JPG", &b"front-bytes"[..]), ("back.png", &b"back-bytes"[..])],
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", created);

    let images: Vec<String> = serde_json::from_value(created["images"].clone()).unwrap();
    assert_eq!(images.len(), 2);
    assert!(images[0].starts_with("/uploads/images-") && images[0].ends_with(".jpg"));
    assert!(images[1].ends_with(".png"));

    let (status, bytes) = app.get_raw(&images[0]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"front-bytes");

    let id = created["_id"].as_str().unwrap();

    // Sin ficheros nuevos se conservan las imágenes
    let (_, unchanged) = app
        .multipart(
            Method::PUT,
            &format!("/api/vehicles/{}", id),
            &[("commentaires", "Première main")],
            &[],
        )
        .await;
    assert_eq!(unchanged["images"], created["images"]);

    // Con ficheros nuevos se reemplaza la lista entera
    let (status, replaced) = app
        .multipart(
            Method::PUT,
            &format!("/api/vehicles/{}", id),
            &[],
            &[("side.webp", &b"side-bytes"[..])],
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let new_images: Vec<String> = serde_json::from_value(replaced["images"].clone()).unwrap();
    assert_eq!(new_images.len(), 1);
    assert!(new_images[0].ends_with(".webp"));
    assert!(!images.contains(&new_images[0]));
    assert_eq!(replaced["commentaires"], "Première main");
}

#[tokio::test]
async fn test_too_many_images_is_rejected() {
    let app = create_test_app();
    let files: Vec<(&str, &[u8])> = vec![
        ("1.jpg", &b"1"[..]),
        ("2.jpg", &b"2"[..]),
        ("3.jpg", &b"3"[..]),
        ("4.jpg", &b"4"[..]),
    ];

    let (status, body) = app
        .multipart(
            Method::POST,
            "/api/vehicles",
            &[("marque", "Audi"), ("modele", "A4"), ("prix", "25000")],
            &files,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, list) = app.get("/api/vehicles").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_orders_join_and_status() {
    let app = create_test_app();
    let vehicle = app
        .create_vehicle(&[("marque", "Hyundai"), ("modele", "Tucson"), ("prix", "24000")])
        .await;
    let vehicle_id = vehicle["_id"].as_str().unwrap();

    let order = app.create_order(vehicle_id).await;
    assert_eq!(order["statut"], "En attente");
    assert_eq!(order["vehiculeId"], vehicle_id);
    let order_id = order["_id"].as_str().unwrap();

    let (status, listed) = app.get("/api/commandes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed[0]["_id"], order_id);
    assert_eq!(listed[0]["vehiculeId"]["marque"], "Hyundai");
    assert_eq!(listed[0]["vehiculeRef"], vehicle_id);

    let (status, confirmed) = app
        .json(
            Method::PUT,
            &format!("/api/commandes/{}", order_id),
            json!({ "statut": "Confirmed", "nomComplet": "Quelqu'un d'autre" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmed["statut"], "Confirmé");
    assert_eq!(confirmed["nomComplet"], "Jean Mukendi");

    let mut expected = order.clone();
    expected["statut"] = json!("Confirmé");
    assert_eq!(confirmed, expected);

    let (status, _) = app
        .json(
            Method::PUT,
            &format!("/api/commandes/{}", order_id),
            json!({ "statut": "Expédié" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .json(
            Method::PUT,
            &format!("/api/commandes/{}", uuid::Uuid::new_v4()),
            json!({ "statut": "Livré" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_validation() {
    let app = create_test_app();

    let (status, _) = app
        .json(
            Method::POST,
            "/api/commandes",
            json!({ "vehiculeId": uuid::Uuid::new_v4().to_string(), "nomComplet": "X" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .json(
            Method::POST,
            "/api/commandes",
            json!({
                "vehiculeId": uuid::Uuid::new_v4().to_string(),
                "nomComplet": "Jean",
                "telephone": "081",
                "adresse": "Gombe",
                "moyenPaiement": "Carte",
                "dateLivraison": "2025-09-01",
                "heureLivraison": "14:00"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Request::post("/api/commandes")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats_with_orphaned_order() {
    let app = create_test_app();

    let (status, empty) = app.get("/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["totalVehicules"], 0);
    assert_eq!(empty["totalCommandes"], 0);
    assert_eq!(empty["commandesEnAttente"], 0);
    assert_eq!(empty["chiffreAffaires"], 0.0);

    let kept = app
        .create_vehicle(&[("marque", "Ford"), ("modele", "Ranger"), ("prix", "27000")])
        .await;
    let doomed = app
        .create_vehicle(&[("marque", "Fiat"), ("modele", "500"), ("prix", "7000")])
        .await;
    let kept_id = kept["_id"].as_str().unwrap();
    let doomed_id = doomed["_id"].as_str().unwrap();

    let confirmed = app.create_order(kept_id).await;
    app.create_order(kept_id).await;
    app.create_order(doomed_id).await;

    app.json(
        Method::PUT,
        &format!("/api/commandes/{}", confirmed["_id"].as_str().unwrap()),
        json!({ "statut": "Confirmé" }),
    )
    .await;

    let (_, before) = app.get("/api/stats").await;
    assert_eq!(before["chiffreAffaires"], 61000.0);

    app.delete(&format!("/api/vehicles/{}", doomed_id)).await;

    let (_, orders) = app.get("/api/commandes").await;
    let orphan = orders
        .as_array()
        .unwrap()
        .iter()
        .find(|o| o["vehiculeRef"] == doomed_id)
        .unwrap();
    assert!(orphan["vehiculeId"].is_null());

    let (_, after) = app.get("/api/stats").await;
    assert_eq!(after["totalVehicules"], 1);
    assert_eq!(after["totalCommandes"], 3);
    assert_eq!(after["commandesEnAttente"], 2);
    assert_eq!(after["chiffreAffaires"], 54000.0);
}

#[tokio::test]
async fn test_price_outside_column_range_is_rejected() {
    let app = create_test_app();

    for price in ["15000.555", "1000000000000"] {
        let (status, body) = app
            .multipart(
                Method::POST,
                "/api/vehicles",
                &[("marque", "Lexus"), ("modele", "RX"), ("prix", price)],
                &[],
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", price);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    let created = app
        .create_vehicle(&[("marque", "Lexus"), ("modele", "RX"), ("prix", "15000.55")])
        .await;
    assert!((created["prix"].as_f64().unwrap() - 15000.55).abs() < 1e-6);
}

#[tokio::test]
async fn test_blank_order_fields_are_rejected() {
    let app = create_test_app();
    let vehicle = app
        .create_vehicle(&[("marque", "Suzuki"), ("modele", "Swift"), ("prix", "11000")])
        .await;

    let (status, body) = app
        .json(
            Method::POST,
            "/api/commandes",
            json!({
                "vehiculeId": vehicle["_id"].clone(),
                "nomComplet": "   ",
                "telephone": "   ",
                "adresse": "   ",
                "moyenPaiement": "   ",
                "dateLivraison": "2025-09-01",
                "heureLivraison": "   "
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, orders) = app.get("/api/commandes").await;
    assert_eq!(orders, json!([]));
}

#[tokio::test]
async fn test_non_multipart_vehicle_body_gets_json_error() {
    let app = create_test_app();

    let (status, body) = app
        .json(
            Method::POST,
            "/api/vehicles",
            json!({ "marque": "Toyota", "modele": "Yaris", "prix": 9000 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].is_string());

    let (status, body) = app
        .json(
            Method::PUT,
            &format!("/api/vehicles/{}", uuid::Uuid::new_v4()),
            json!({ "prix": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
