//! Catalog invariants exercised against an in-memory store.

use opkb::db::Store;
use opkb::entities::characters::{CharacterStatus, Role};
use opkb::entities::devil_fruits::{FruitStatus, FruitType};
use opkb::entities::fruit_holders;
use opkb::models::catalog::{
    ArcInput, CharacterInput, CrewInput, DevilFruitInput, EpisodeInput, HolderInput,
};
use opkb::services::{AdminError, AdminService, SeaOrmAdminService, SeedOptions, Seeder};

async fn setup() -> (Store, SeaOrmAdminService) {
    let store = Store::new("sqlite::memory:").await.unwrap();
    let admin = SeaOrmAdminService::new(store.clone());
    (store, admin)
}

fn character(name: &str) -> CharacterInput {
    CharacterInput {
        name: name.to_string(),
        epithet: String::new(),
        role: Role::Pirate,
        bounty: 0,
        origin: String::new(),
        status: CharacterStatus::Alive,
        first_appearance_episode_id: None,
        description: String::new(),
        image_url: String::new(),
    }
}

fn fruit(name: &str, rarity: i32) -> DevilFruitInput {
    DevilFruitInput {
        name: name.to_string(),
        romanji: String::new(),
        fruit_type: FruitType::Logia,
        ability: "Feu".to_string(),
        weaknesses: String::new(),
        rarity,
        status: FruitStatus::Active,
        first_appearance_arc_id: None,
        description: String::new(),
    }
}

fn holder(devil_fruit_id: i32, character_id: i32, is_current: bool) -> HolderInput {
    HolderInput {
        devil_fruit_id,
        character_id,
        from_date: None,
        to_date: None,
        is_current,
    }
}

fn crew(name: &str, captain_id: Option<i32>) -> CrewInput {
    CrewInput {
        name: name.to_string(),
        ship_name: String::new(),
        base_location: String::new(),
        description: String::new(),
        captain_id,
    }
}

fn current_of(rows: &[fruit_holders::Model]) -> Vec<i32> {
    rows.iter()
        .filter(|row| row.is_current)
        .map(|row| row.character_id)
        .collect()
}

#[tokio::test]
async fn test_current_holder_takeover_demotes_previous() {
    let (store, admin) = setup().await;
    let mera = admin.create_fruit(fruit("Mera Mera no Mi", 5)).await.unwrap();
    let ace = admin.create_character(character("Portgas D. Ace")).await.unwrap();
    let sabo = admin.create_character(character("Sabo")).await.unwrap();

    let first = admin.create_holder(holder(mera.id, ace.id, true)).await.unwrap();
    assert!(first.is_current);

    let second = admin.create_holder(holder(mera.id, sabo.id, true)).await.unwrap();
    assert!(second.is_current);

    let rows = store.fruit_holders().all().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(current_of(&rows), vec![sabo.id]);
    assert_eq!(store.fruit_holders().count_current(mera.id).await.unwrap(), 1);

    let ace_row = store.fruit_holders().get(first.id).await.unwrap().unwrap();
    assert!(!ace_row.is_current);
}

#[tokio::test]
async fn test_update_to_current_keeps_single_current() {
    let (store, admin) = setup().await;
    let mera = admin.create_fruit(fruit("Mera Mera no Mi", 5)).await.unwrap();
    let ace = admin.create_character(character("Portgas D. Ace")).await.unwrap();
    let sabo = admin.create_character(character("Sabo")).await.unwrap();

    let ace_row = admin.create_holder(holder(mera.id, ace.id, false)).await.unwrap();
    admin.create_holder(holder(mera.id, sabo.id, true)).await.unwrap();

    // Re-saving the current row does not demote itself.
    admin
        .update_holder(ace_row.id, holder(mera.id, ace.id, true))
        .await
        .unwrap();
    admin
        .update_holder(ace_row.id, holder(mera.id, ace.id, true))
        .await
        .unwrap();

    let rows = store.fruit_holders().all().await.unwrap();
    assert_eq!(current_of(&rows), vec![ace.id]);
}

#[tokio::test]
async fn test_non_current_write_leaves_others_untouched() {
    let (store, admin) = setup().await;
    let mera = admin.create_fruit(fruit("Mera Mera no Mi", 5)).await.unwrap();
    let ace = admin.create_character(character("Portgas D. Ace")).await.unwrap();
    let roger = admin.create_character(character("Gol D. Roger")).await.unwrap();

    admin.create_holder(holder(mera.id, ace.id, true)).await.unwrap();
    admin.create_holder(holder(mera.id, roger.id, false)).await.unwrap();

    let rows = store.fruit_holders().all().await.unwrap();
    assert_eq!(current_of(&rows), vec![ace.id]);
}

#[tokio::test]
async fn test_holders_of_other_fruits_are_not_demoted() {
    let (store, admin) = setup().await;
    let mera = admin.create_fruit(fruit("Mera Mera no Mi", 5)).await.unwrap();
    let hie = admin.create_fruit(fruit("Hie Hie no Mi", 5)).await.unwrap();
    let ace = admin.create_character(character("Portgas D. Ace")).await.unwrap();
    let aokiji = admin.create_character(character("Kuzan")).await.unwrap();

    admin.create_holder(holder(mera.id, ace.id, true)).await.unwrap();
    admin.create_holder(holder(hie.id, aokiji.id, true)).await.unwrap();

    assert_eq!(store.fruit_holders().count_current(mera.id).await.unwrap(), 1);
    assert_eq!(store.fruit_holders().count_current(hie.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_holder_requires_existing_references() {
    let (store, admin) = setup().await;
    let mera = admin.create_fruit(fruit("Mera Mera no Mi", 5)).await.unwrap();

    let err = admin.create_holder(holder(mera.id, 404, true)).await.unwrap_err();
    assert!(matches!(err, AdminError::Validation { ref field, .. } if field == "character"));

    let err = admin.create_holder(holder(404, 1, true)).await.unwrap_err();
    assert!(matches!(err, AdminError::Validation { ref field, .. } if field == "devil_fruit"));

    assert!(store.fruit_holders().all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rarity_boundaries() {
    let (_, admin) = setup().await;

    for rarity in [0, 6] {
        let err = admin
            .create_fruit(fruit(&format!("Fruit {rarity}"), rarity))
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::Validation { ref field, .. } if field == "rarity"));
    }

    for rarity in [1, 5] {
        let created = admin
            .create_fruit(fruit(&format!("Fruit {rarity}"), rarity))
            .await
            .unwrap();
        assert_eq!(created.rarity, rarity);
    }
}

#[tokio::test]
async fn test_deleting_arc_detaches_episodes_and_fruits() {
    let (store, admin) = setup().await;
    let arc = admin
        .create_arc(ArcInput {
            name: "Alabasta".to_string(),
            saga: "Alabasta".to_string(),
            start_episode_number: 62,
            end_episode_number: 130,
            description: String::new(),
        })
        .await
        .unwrap();
    let episode = admin
        .create_episode(EpisodeInput {
            number: 62,
            title: "Épisode 62".to_string(),
            air_date: None,
            arc_id: Some(arc.id),
        })
        .await
        .unwrap();
    let mut suna = fruit("Suna Suna no Mi", 4);
    suna.first_appearance_arc_id = Some(arc.id);
    let suna = admin.create_fruit(suna).await.unwrap();

    admin.delete_arc(arc.id).await.unwrap();

    let episode = store.episodes().get(episode.id).await.unwrap().unwrap();
    assert_eq!(episode.arc_id, None);
    let suna = store.devil_fruits().get(suna.id).await.unwrap().unwrap();
    assert_eq!(suna.first_appearance_arc_id, None);
}

#[tokio::test]
async fn test_deleting_captain_detaches_crew() {
    let (store, admin) = setup().await;
    let shanks = admin.create_character(character("Shanks")).await.unwrap();
    let red_hair = admin
        .create_crew(crew("Équipage du Roux", Some(shanks.id)))
        .await
        .unwrap();

    admin.delete_character(shanks.id).await.unwrap();

    let red_hair = store.crews().get(red_hair.id).await.unwrap().unwrap();
    assert_eq!(red_hair.captain_id, None);
}

#[tokio::test]
async fn test_deleting_episode_detaches_first_appearance() {
    let (store, admin) = setup().await;
    let episode = admin
        .create_episode(EpisodeInput {
            number: 4,
            title: "Épisode 4".to_string(),
            air_date: None,
            arc_id: None,
        })
        .await
        .unwrap();
    let mut buggy = character("Baggy");
    buggy.first_appearance_episode_id = Some(episode.id);
    let buggy = admin.create_character(buggy).await.unwrap();

    admin.delete_episode(episode.id).await.unwrap();

    let buggy = store.characters().get(buggy.id).await.unwrap().unwrap();
    assert_eq!(buggy.first_appearance_episode_id, None);
}

#[tokio::test]
async fn test_deleting_crew_or_character_removes_memberships() {
    let (store, admin) = setup().await;
    let luffy = admin.create_character(character("Monkey D. Luffy")).await.unwrap();
    let zoro = admin.create_character(character("Roronoa Zoro")).await.unwrap();
    let straw_hats = admin
        .create_crew(crew("Équipage du Chapeau de Paille", Some(luffy.id)))
        .await
        .unwrap();
    let cross_guild = admin.create_crew(crew("Cross Guild", None)).await.unwrap();
    admin
        .set_crew_members(straw_hats.id, &[luffy.id, zoro.id])
        .await
        .unwrap();
    admin.set_crew_members(cross_guild.id, &[zoro.id]).await.unwrap();

    admin.delete_character(zoro.id).await.unwrap();
    let memberships = store.crews().all_memberships().await.unwrap();
    assert_eq!(memberships.len(), 1);
    assert_eq!(memberships[0].character_id, luffy.id);

    admin.delete_crew(straw_hats.id).await.unwrap();
    assert!(store.crews().all_memberships().await.unwrap().is_empty());
    assert!(store.characters().get(luffy.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_deleting_character_cascades_holders() {
    let (store, admin) = setup().await;
    let mera = admin.create_fruit(fruit("Mera Mera no Mi", 5)).await.unwrap();
    let ace = admin.create_character(character("Portgas D. Ace")).await.unwrap();
    let sabo = admin.create_character(character("Sabo")).await.unwrap();
    admin.create_holder(holder(mera.id, ace.id, false)).await.unwrap();
    admin.create_holder(holder(mera.id, sabo.id, true)).await.unwrap();

    admin.delete_character(ace.id).await.unwrap();

    let rows = store.fruit_holders().all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].character_id, sabo.id);
    assert!(store.devil_fruits().get(mera.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_deleting_fruit_cascades_holders() {
    let (store, admin) = setup().await;
    let mera = admin.create_fruit(fruit("Mera Mera no Mi", 5)).await.unwrap();
    let sabo = admin.create_character(character("Sabo")).await.unwrap();
    admin.create_holder(holder(mera.id, sabo.id, true)).await.unwrap();

    admin.delete_fruit(mera.id).await.unwrap();

    assert!(store.fruit_holders().all().await.unwrap().is_empty());
    assert!(store.characters().get(sabo.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_missing_record_is_not_found() {
    let (_, admin) = setup().await;
    let err = admin.delete_character(77).await.unwrap_err();
    assert!(matches!(err, AdminError::NotFound(_)));
}

#[tokio::test]
async fn test_seed_is_idempotent_under_reset() {
    let (store, _) = setup().await;
    let options = SeedOptions {
        reset: true,
        episodes: 120,
        rng_seed: Some(42),
        ..SeedOptions::default()
    };

    let first = Seeder::new(store.clone(), options.rng_seed)
        .run(&options)
        .await
        .unwrap();
    let counts_after_first = store.counts().await.unwrap();

    let second = Seeder::new(store.clone(), options.rng_seed)
        .run(&options)
        .await
        .unwrap();
    let counts_after_second = store.counts().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(counts_after_first.arcs, 27);
    assert_eq!(counts_after_first.devil_fruits, 20);
    assert_eq!(counts_after_first.crews, 13);
    assert_eq!(counts_after_first.characters, 30);
    assert_eq!(counts_after_first.episodes, 120);
    assert_eq!(counts_after_first.arcs, counts_after_second.arcs);
    assert_eq!(counts_after_first.characters, counts_after_second.characters);
    assert_eq!(counts_after_first.fruit_holders, counts_after_second.fruit_holders);

    // Absalom is not in the builtin characters, so his fruit stays unheld.
    assert_eq!(first.fruit_holders, 15);

    let without_reset = Seeder::new(store.clone(), None)
        .run(&SeedOptions::default())
        .await;
    assert!(without_reset.is_err());
}
