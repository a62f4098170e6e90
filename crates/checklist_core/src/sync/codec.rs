//! Text encoding of a collection snapshot.
//!
//! The slot holds a bare JSON array of lists, e.g.
//! `[{"id":"list-1","title":"Groceries","createdAt":"07/03/2024","items":[...]}]`.
//! There is no version field.

use crate::model::checklist::Collection;

pub fn encode_collection(collection: &Collection) -> serde_json::Result<String> {
    serde_json::to_string(collection)
}

pub fn decode_collection(raw: &str) -> serde_json::Result<Collection> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::{decode_collection, encode_collection};
    use crate::model::checklist::Collection;
    use crate::store::ops::{add_item, create_list, toggle_item};

    #[test]
    fn encodes_wire_field_names() {
        let collection = create_list(&Collection::default(), "Groceries").expect("valid title");
        let list_id = collection.lists[0].id.clone();
        let collection = add_item(&collection, &list_id, "Milk").expect("valid name");

        let value: serde_json::Value =
            serde_json::from_str(&encode_collection(&collection).expect("encode"))
                .expect("valid json");
        let list = &value[0];
        assert_eq!(list["title"], "Groceries");
        assert!(list["createdAt"].is_string());
        assert_eq!(list["items"][0]["name"], "Milk");
        assert_eq!(list["items"][0]["quantity"], 1);
        assert_eq!(list["items"][0]["completed"], false);
    }

    #[test]
    fn decode_reverses_encode() {
        let collection = create_list(&Collection::default(), "Groceries").expect("valid title");
        let list_id = collection.lists[0].id.clone();
        let collection = add_item(&collection, &list_id, "Milk").expect("valid name");
        let item_id = collection.lists[0].items[0].id.clone();
        let collection = toggle_item(&collection, &list_id, &item_id);

        let encoded = encode_collection(&collection).expect("encode");
        assert_eq!(decode_collection(&encoded).expect("decode"), collection);
    }

    #[test]
    fn escaped_and_non_ascii_text_survives_round_trip() {
        let collection =
            create_list(&Collection::default(), "Pão \"francês\"").expect("valid title");
        let padaria = collection.lists[0].id.clone();
        let collection = create_list(&collection, r"C:\compras\sábado").expect("valid title");
        let sabado = collection.lists[1].id.clone();
        let collection = create_list(&collection, "Lista vazia ✓").expect("valid title");

        let collection = add_item(&collection, &padaria, "Açúcar mascavo").expect("valid name");
        let collection = add_item(&collection, &padaria, "Café \"forte\"").expect("valid name");
        let collection = add_item(&collection, &sabado, "寿司 🍣\ttab").expect("valid name");
        let item_id = collection.lists[0].items[1].id.clone();
        let collection = toggle_item(&collection, &padaria, &item_id);

        let encoded = encode_collection(&collection).expect("encode");
        let decoded = decode_collection(&encoded).expect("decode");
        assert_eq!(decoded, collection);
        assert_eq!(decoded.lists[0].title, "Pão \"francês\"");
        assert_eq!(decoded.lists[1].title, r"C:\compras\sábado");
        assert!(decoded.lists[2].items.is_empty());
    }

    #[test]
    fn decodes_payload_with_timestamp_ids() {
        let raw = r#"[{"id":"list-1718000000000","title":"Feira","createdAt":"10/06/2024","items":[{"id":"item-1718000001000","name":"Banana","quantity":1,"completed":true}]}]"#;
        let collection = decode_collection(raw).expect("decode");
        assert_eq!(collection.lists[0].id, "list-1718000000000");
        assert_eq!(collection.lists[0].created_at, "10/06/2024");
        assert!(collection.lists[0].items[0].completed);
    }

    #[test]
    fn rejects_non_array_payload() {
        assert!(decode_collection(r#"{"lists":[]}"#).is_err());
        assert!(decode_collection("not json").is_err());
    }
}
