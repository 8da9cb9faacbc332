//! The schema catalog: every nested data structure and journal event the
//! decoder knows about, defined once and registered explicitly.
//!
//! Wire keys follow the title-case naming convention and are derived from the
//! logical field names; explicit `.key(..)` overrides mark the spots where
//! the producer deviates (lowercase `id`, `Age_MY`, `NpcCrewId`, …).

use crate::entity::FieldValue;
use crate::schema::{FieldDescriptor, FieldKind, Schema};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

// ---------------------------------------------------------------------------
// Nested data schemas
// ---------------------------------------------------------------------------

pub static BODY: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Body")
        .text_key("name", "Body")
        .int_key("id", "BodyID")
        .text_key("type", "BodyType")
        .build()
});

/// The `Scan`/`ApproachSettlement` records carry the body name under
/// `BodyName` instead of `Body`; everything else matches the plain body
/// schema.
pub static BODY_FOR_SCAN: LazyLock<Arc<Schema>> =
    LazyLock::new(|| Schema::derive("Body", &BODY).text_key("name", "BodyName").build());

pub static CARGO_ITEM: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("CargoItem")
        .localised("name")
        .int("count")
        .int("stolen")
        .build()
});

pub static COMMODITY: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Commodity")
        .int_key("id", "id")
        .localised("name")
        .localised("category")
        .int("buy_price")
        .int("sell_price")
        .int("mean_price")
        .int("stock_bracket")
        .int("demand_bracket")
        .int("stock")
        .int("demand")
        .boolean("consumer")
        .boolean("producer")
        .boolean("rare")
        .build()
});

pub static COMPONENT: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Component")
        .text("name")
        .float("percent")
        .build()
});

pub static CONFLICT_FACTION: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("ConflictFaction")
        .text("name")
        .text("stake")
        .int("won_days")
        .build()
});

pub static CONFLICT: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Conflict")
        .text("war_type")
        .text("status")
        .entity("faction1", &CONFLICT_FACTION)
        .entity("faction2", &CONFLICT_FACTION)
        .build()
});

pub static ECONOMY: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Economy")
        .localised("name")
        .float("proportion")
        .build()
});

pub static EFFECT: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Effect")
        .localised("effect")
        .text("trend")
        .build()
});

pub static ENGINEER: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Engineer")
        .text("engineer")
        .int("engineer_id")
        .build()
});

pub static ENGINEERED_MODIFIER: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("EngineeredModifier")
        .text("label")
        .float("value")
        .float("original_value")
        .field(
            // The producer writes this flag as 0/1 rather than a boolean.
            FieldDescriptor::new("less_is_good", FieldKind::Bool)
                .precheck(|v| v.is_boolean() || matches!(v.as_i64(), Some(0 | 1)))
                .convert(|v| match (v.as_bool(), v.as_i64()) {
                    (Some(b), _) => Ok(FieldValue::Bool(b)),
                    (_, Some(i)) => Ok(FieldValue::Bool(i != 0)),
                    _ => Err("expected a boolean flag".to_string()),
                })
                .revert(|v| match v.as_bool() {
                    Some(b) => Value::from(b as i64),
                    None => v.to_wire(),
                }),
        )
        .build()
});

pub static ENGINEERING: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Engineering")
        .flatten("engineer", &ENGINEER)
        .int("blueprint_id")
        .text("blueprint_name")
        .int("level")
        .float("quality")
        .entities("modifiers", &ENGINEERED_MODIFIER)
        .build()
});

pub static ENGINEER_PROGRESS_DATA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::derive("EngineerProgress", &ENGINEER)
        .text("progress")
        .int("rank_progress")
        .int("rank")
        .build()
});

pub static EXPLORATION_DATA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("ExplorationData")
        .text("system_name")
        .int("num_bodies")
        .build()
});

pub static FACTION: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Faction")
        .text("name")
        .text("faction_state")
        .build()
});

pub static INFLUENCE: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Influence")
        .int("system_address")
        .text("trend")
        .text("influence")
        .build()
});

pub static FACTION_EFFECT: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("FactionEffect")
        .text("faction")
        .entities("effects", &EFFECT)
        .entities("influence", &INFLUENCE)
        .text("reputation_trend")
        .text("reputation")
        .build()
});

pub static FACTION_STATE: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("FactionState")
        .text("state")
        .int("trend")
        .build()
});

pub static FACTION_FULL: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::derive("FactionFull", &FACTION)
        .text("government")
        .float("influence")
        .text("allegiance")
        .localised("happiness")
        .float("my_reputation")
        .entities("active_states", &FACTION_STATE)
        .entities("recovering_states", &FACTION_STATE)
        .entities("pending_states", &FACTION_STATE)
        .build()
});

/// Base shared by every event that happens at a station market.
pub static MARKET_BASE: LazyLock<Arc<Schema>> =
    LazyLock::new(|| Schema::data("MarketBase").int("market_id").build());

pub static MATERIAL: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Material")
        .localised("name")
        .localised("category")
        .int("count")
        .build()
});

pub static MATERIALS_DATA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Materials")
        .entities("raw", &MATERIAL)
        .entities("manufactured", &MATERIAL)
        .entities("encoded", &MATERIAL)
        .build()
});

pub static MISSION: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Mission")
        .int_key("id", "MissionID")
        .text("name")
        .boolean("passenger_mission")
        .int("expires")
        .build()
});

pub static MISSIONS_DATA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Missions")
        .entities("active", &MISSION)
        .entities("failed", &MISSION)
        .entities("complete", &MISSION)
        .build()
});

pub static MODULE: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Module")
        .text("slot")
        .text("item")
        .boolean("on")
        .float("power")
        .int("priority")
        .float("health")
        .int("ammo_in_clip")
        .int("ammo_in_hopper")
        .entity("engineering", &ENGINEERING)
        .build()
});

pub static MODULE_PRICE: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("ModulePrice")
        .int_key("id", "id")
        .text("name")
        .int("buy_price")
        .build()
});

pub static RANKING: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Ranking")
        .int("combat")
        .int("trade")
        .int("explore")
        .int("empire")
        .int("federation")
        .int("cqc")
        .build()
});

pub static REDEEM: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Redeem")
        .text("faction")
        .int("amount")
        .build()
});

pub static REWARD: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Reward")
        .text("faction")
        .int("reward")
        .build()
});

pub static RING: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Ring")
        .text("name")
        .text("ring_class")
        .float_key("mass_mt", "MassMT")
        .float("inner_rad")
        .float("outer_rad")
        .build()
});

pub static SHIP: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Ship")
        .localised("ship")
        .int("ship_id")
        .text("ship_name")
        .text("ship_ident")
        .float("unladen_mass")
        .int("hull_value")
        .int("modules_value")
        .float("hull_health")
        .int("cargo_capacity")
        .float("max_jump_range")
        .int("rebuy")
        .entities("modules", &MODULE)
        .build()
});

pub static SHIP_PRICE: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("ShipPrice")
        .int_key("id", "id")
        .localised("ship_type")
        .int("ship_price")
        .build()
});

pub static STATION: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Station")
        .text_key("name", "StationName")
        .text_key("type", "StationType")
        .text("carrier_docking_access")
        .build()
});

pub static STATION_FULL: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::derive("StationFull", &STATION)
        .entity_key("faction", "StationFaction", &FACTION)
        .localised_key("government", "StationGovernment")
        .text_key("allegiance", "StationAllegiance")
        .strings_key("services", "StationServices")
        .localised_key("economy", "StationEconomy")
        .entities_key("economies", "StationEconomies", &ECONOMY)
        .build()
});

pub static STATISTICS_DATA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("Statistics")
        .map_key("bank_account", "Bank_Account")
        .map("combat")
        .map("crime")
        .map("smuggling")
        .map("trading")
        .map("mining")
        .map("exploration")
        .map("passengers")
        .map_key("search_and_rescue", "Search_And_Rescue")
        .map("crafting")
        .map("crew")
        .map("multicrew")
        .map_key("material_trader", "Material_Trader_Stats")
        .map("cqc")
        .build()
});

pub static STORED_MODULE: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("StoredModule")
        .localised("name")
        .int("storage_slot")
        .text("star_system")
        .int("market_id")
        .int("transfer_cost")
        .int("transfer_time")
        .boolean("in_transit")
        .int("buy_price")
        .boolean("hot")
        .build()
});

pub static STORED_SHIP: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("StoredShip")
        .int("ship_id")
        .localised("ship_type")
        .text("name")
        .text("star_system")
        .int("ship_market_id")
        .int("transfer_price")
        .int("transfer_time")
        .boolean("in_transit")
        .int("value")
        .boolean("hot")
        .build()
});

/// `ShipyardTransfer` writes the system under `System` rather than
/// `StarSystem`.
pub static SHIP_FOR_TRANSFER: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::derive("StoredShip", &STORED_SHIP)
        .text_key("star_system", "System")
        .build()
});

pub static SYSTEM: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::data("System")
        .text("star_system")
        .int("system_address")
        .coords("star_pos")
        .text("star_class")
        .build()
});

pub static SYSTEM_FULL: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::derive("SystemFull", &SYSTEM)
        .text_key("allegiance", "SystemAllegiance")
        .localised_key("economy", "SystemEconomy")
        .localised_key("second_economy", "SystemSecondEconomy")
        .localised_key("government", "SystemGovernment")
        .localised_key("security", "SystemSecurity")
        .int("population")
        .build()
});

// ---------------------------------------------------------------------------
// Event schemas
// ---------------------------------------------------------------------------

static FILEHEADER: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    // The header record is the one place the producer uses lowercase keys.
    Schema::event("Fileheader")
        .int_key("part", "part")
        .text_key("language", "language")
        .text_key("gameversion", "gameversion")
        .text_key("build", "build")
        .build()
});

static CONTINUED: LazyLock<Arc<Schema>> =
    LazyLock::new(|| Schema::event("Continued").int_key("part", "part").build());

static SHUTDOWN: LazyLock<Arc<Schema>> = LazyLock::new(|| Schema::event("Shutdown").build());

static APPROACH_BODY: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("ApproachBody")
        .flatten("system", &SYSTEM)
        .flatten("body", &BODY)
        .build()
});

static APPROACH_SETTLEMENT: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("ApproachSettlement")
        .inherit(&MARKET_BASE)
        .text("name")
        .int("system_address")
        .flatten("body", &BODY_FOR_SCAN)
        .float("latitude")
        .float("longitude")
        .build()
});

static BOUNTY: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Bounty")
        .entities("rewards", &REWARD)
        .localised("target")
        .int("total_reward")
        .text("victim_faction")
        .build()
});

static BUY_AMMO: LazyLock<Arc<Schema>> =
    LazyLock::new(|| Schema::event("BuyAmmo").int("cost").build());

static BUY_TRADE_DATA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("BuyTradeData").text("system").int("cost").build()
});

static CARGO: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Cargo")
        .text("vessel")
        .int("count")
        .entities("inventory", &CARGO_ITEM)
        .build()
});

static CODEX_ENTRY: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("CodexEntry")
        .int_key("id", "EntryID")
        .localised("name")
        .localised("category")
        .localised("sub_category")
        .localised("region")
        .text("system")
        .int("system_address")
        .text("nearest_destination")
        .boolean("is_new_entry")
        .build()
});

static COLLECT_CARGO: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("CollectCargo")
        .localised("type")
        .boolean("stolen")
        .int("mission_id")
        .build()
});

static COMMANDER: LazyLock<Arc<Schema>> =
    LazyLock::new(|| Schema::event("Commander").text("fid").text("name").build());

static COMMIT_CRIME: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("CommitCrime")
        .text("crime_type")
        .text("faction")
        .int("fine")
        .int("bounty")
        .build()
});

static CREW_ASSIGN: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("CrewAssign")
        .text("name")
        .int("crew_id")
        .text("role")
        .build()
});

static DIED: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Died")
        .text("killer_name")
        .text("killer_ship")
        .text("killer_rank")
        .build()
});

static DOCKED: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Docked")
        .inherit(&MARKET_BASE)
        .flatten("station", &STATION_FULL)
        .float("dist_from_star_ls")
        .flatten("system", &SYSTEM)
        .build()
});

static DOCKING_DENIED: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("DockingDenied")
        .inherit(&MARKET_BASE)
        .text("reason")
        .flatten("station", &STATION)
        .build()
});

static DOCKING_GRANTED: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("DockingGranted")
        .inherit(&MARKET_BASE)
        .int("landing_pad")
        .flatten("station", &STATION)
        .build()
});

static DOCKING_REQUESTED: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("DockingRequested")
        .inherit(&MARKET_BASE)
        .flatten("station", &STATION)
        .build()
});

static ENGINEER_PROGRESS: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("EngineerProgress")
        .entities("engineers", &ENGINEER_PROGRESS_DATA)
        .build()
});

static ESCAPE_INTERDICTION: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("EscapeInterdiction")
        .text("interdictor")
        .boolean("is_player")
        .build()
});

static FSD_JUMP: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("FSDJump")
        .flatten("system", &SYSTEM_FULL)
        .flatten("body", &BODY)
        .float("jump_dist")
        .float("fuel_used")
        .float("fuel_level")
        .entities("factions", &FACTION_FULL)
        .entity("system_faction", &FACTION)
        .entities("conflicts", &CONFLICT)
        .build()
});

static FSD_TARGET: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("FSDTarget")
        .text("name")
        .flatten("system", &SYSTEM)
        .int("remaining_jumps_in_route")
        .build()
});

static FSS_ALL_BODIES_FOUND: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("FSSAllBodiesFound")
        .text("system_name")
        .int("system_address")
        .int("count")
        .build()
});

static FSS_DISCOVERY_SCAN: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("FSSDiscoveryScan")
        .float("progress")
        .int("body_count")
        .int("non_body_count")
        .text("system_name")
        .int("system_address")
        .build()
});

static FSS_SIGNAL_DISCOVERED: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("FSSSignalDiscovered")
        .int("system_address")
        .localised("signal_name")
        .boolean("is_station")
        .localised("uss_type")
        .localised("spawning_state")
        .localised("spawning_faction")
        .int("threat_level")
        .build()
});

static FUEL_SCOOP: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("FuelScoop").float("scooped").float("total").build()
});

static HULL_DAMAGE: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("HullDamage")
        .float("health")
        .boolean("player_pilot")
        .boolean("fighter")
        .build()
});

static INTERDICTED: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Interdicted")
        .boolean("submitted")
        .text("interdictor")
        .boolean("is_player")
        .text("faction")
        .build()
});

static LEAVE_BODY: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("LeaveBody")
        .flatten("system", &SYSTEM)
        .flatten("body", &BODY)
        .build()
});

static LOAD_GAME: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("LoadGame")
        .text("fid")
        .text("commander")
        .boolean("horizons")
        .flatten("ship", &SHIP)
        .float("fuel_level")
        .float("fuel_capacity")
        .text("game_mode")
        .int("credits")
        .int("loan")
        .build()
});

static LOADOUT: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Loadout")
        .flatten("ship", &SHIP)
        .map("fuel_capacity")
        .build()
});

static LOCATION: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Location")
        .inherit(&MARKET_BASE)
        .flatten("station", &STATION_FULL)
        .boolean("docked")
        .flatten("system", &SYSTEM_FULL)
        .flatten("body", &BODY)
        .entities("factions", &FACTION_FULL)
        .entity("system_faction", &FACTION)
        .entities("conflicts", &CONFLICT)
        .build()
});

static MARKET: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Market")
        .inherit(&MARKET_BASE)
        .text("star_system")
        .flatten("station", &STATION)
        .entities_key("commodities", "Items", &COMMODITY)
        .build()
});

static MARKET_BUY: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("MarketBuy")
        .inherit(&MARKET_BASE)
        .localised("type")
        .int("count")
        .int("buy_price")
        .int("total_cost")
        .build()
});

static MARKET_SELL: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("MarketSell")
        .inherit(&MARKET_BASE)
        .localised("type")
        .int("count")
        .int("sell_price")
        .int("total_sale")
        .int("avg_price_paid")
        .build()
});

static MATERIAL_COLLECTED: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    // The flat record carries its own `Category`, so the material delegate
    // claims an explicit key list instead of the whole Material key set.
    Schema::event("MaterialCollected")
        .text("category")
        .field(
            FieldDescriptor::new("material", FieldKind::Entity(Arc::clone(&MATERIAL)))
                .flatten_keys(vec![
                    "Name".to_string(),
                    "Name_Localised".to_string(),
                    "Count".to_string(),
                ]),
        )
        .build()
});

static MATERIALS: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Materials")
        .flatten("materials", &MATERIALS_DATA)
        .build()
});

static MISSION_ABANDONED: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("MissionAbandoned").flatten("mission", &MISSION).build()
});

static MISSION_ACCEPTED: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("MissionAccepted")
        .flatten("mission", &MISSION)
        .text("faction")
        .localised("target")
        .text("target_faction")
        .localised("commodity")
        .int("count")
        .text("destination_system")
        .text("destination_station")
        .timestamp("expiry")
        .boolean("wing")
        .text("influence")
        .text("reputation")
        .int("reward")
        .build()
});

static MISSION_COMPLETED: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("MissionCompleted")
        .flatten("mission", &MISSION)
        .text("faction")
        .text("target_faction")
        .text("destination_system")
        .text("destination_station")
        .int("reward")
        .entities("commodity_reward", &CARGO_ITEM)
        .entities("materials_reward", &MATERIAL)
        .entities("faction_effects", &FACTION_EFFECT)
        .build()
});

static MISSION_REDIRECTED: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("MissionRedirected")
        .flatten("mission", &MISSION)
        .text("new_destination_station")
        .text("new_destination_system")
        .text("old_destination_station")
        .text("old_destination_system")
        .build()
});

static MISSIONS: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Missions").flatten("missions", &MISSIONS_DATA).build()
});

static MODULE_BUY: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("ModuleBuy")
        .inherit(&MARKET_BASE)
        .text("slot")
        .localised("buy_item")
        .int("buy_price")
        .localised("sell_item")
        .int("sell_price")
        .flatten("ship", &SHIP)
        .build()
});

static MODULE_INFO: LazyLock<Arc<Schema>> =
    LazyLock::new(|| Schema::event("ModuleInfo").entities("modules", &MODULE).build());

static MULTI_SELL_EXPLORATION_DATA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("MultiSellExplorationData")
        .entities("discovered", &EXPLORATION_DATA)
        .int("base_value")
        .int("bonus")
        .int("total_earnings")
        .build()
});

static MUSIC: LazyLock<Arc<Schema>> =
    LazyLock::new(|| Schema::event("Music").text("music_track").build());

static NAV_ROUTE: LazyLock<Arc<Schema>> =
    LazyLock::new(|| Schema::event("NavRoute").entities("route", &SYSTEM).build());

static NPC_CREW_PAID_WAGE: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("NpcCrewPaidWage")
        .int_key("npc_crew_id", "NpcCrewId")
        .text("npc_crew_name")
        .int("amount")
        .build()
});

static OUTFITTING: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Outfitting")
        .inherit(&MARKET_BASE)
        .text("star_system")
        .text("station_name")
        .boolean("horizons")
        .entities_key("modules", "Items", &MODULE_PRICE)
        .build()
});

static PROGRESS: LazyLock<Arc<Schema>> =
    LazyLock::new(|| Schema::event("Progress").flatten("ranking", &RANKING).build());

static PROMOTION: LazyLock<Arc<Schema>> =
    LazyLock::new(|| Schema::event("Promotion").flatten("ranking", &RANKING).build());

static RANK: LazyLock<Arc<Schema>> =
    LazyLock::new(|| Schema::event("Rank").flatten("ranking", &RANKING).build());

static RECEIVE_TEXT: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("ReceiveText")
        .localised("from")
        .text("channel")
        .localised("message")
        .build()
});

static REDEEM_VOUCHER: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("RedeemVoucher")
        .text("type")
        .int("amount")
        .entities("factions", &REDEEM)
        .build()
});

static REFUEL_ALL: LazyLock<Arc<Schema>> =
    LazyLock::new(|| Schema::event("RefuelAll").int("cost").float("amount").build());

static REFUEL_PARTIAL: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("RefuelPartial").int("cost").float("amount").build()
});

static REPAIR: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Repair")
        .localised("item")
        .strings_key("multiple", "Items")
        .int("cost")
        .build()
});

static REPAIR_ALL: LazyLock<Arc<Schema>> =
    LazyLock::new(|| Schema::event("RepairAll").int("cost").build());

static REPUTATION: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Reputation")
        .float("empire")
        .float("federation")
        .float("independent")
        .float("alliance")
        .build()
});

static RESERVOIR_REPLENISHED: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("ReservoirReplenished")
        .float("fuel_main")
        .float("fuel_reservoir")
        .build()
});

static RESURRECT: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Resurrect")
        .text("option")
        .int("cost")
        .boolean("bankrupt")
        .build()
});

static SCAN: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Scan")
        .text("scan_type")
        .flatten("body", &BODY_FOR_SCAN)
        .seq("parents")
        .flatten("system", &SYSTEM)
        .float("distance_from_arrival_ls")
        .text("star_type")
        .int("subclass")
        .boolean("tidal_lock")
        .text("terraform_state")
        .text("planet_class")
        .text("atmosphere")
        .text("atmosphere_type")
        .entities("atmosphere_composition", &COMPONENT)
        .text("volcanism")
        .float("stellar_mass")
        .float_key("mass_em", "MassEM")
        .float("radius")
        .float("absolute_magnitude")
        .int_key("age_my", "Age_MY")
        .float("surface_gravity")
        .float("surface_temperature")
        .float("surface_pressure")
        .text("luminosity")
        .boolean("landable")
        .entities("materials", &COMPONENT)
        .map("composition")
        .float("semi_major_axis")
        .float("eccentricity")
        .float("orbital_inclination")
        .float("periapsis")
        .float("orbital_period")
        .float("rotation_period")
        .float("axial_tilt")
        .entities("rings", &RING)
        .text("reserve_level")
        .boolean("was_discovered")
        .boolean("was_mapped")
        .build()
});

static SCANNED: LazyLock<Arc<Schema>> =
    LazyLock::new(|| Schema::event("Scanned").text("scan_type").build());

static SELL_EXPLORATION_DATA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("SellExplorationData")
        .strings("systems")
        .entities("discovered", &EXPLORATION_DATA)
        .int("base_value")
        .int("bonus")
        .int("total_earnings")
        .build()
});

static SHIP_TARGETED: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("ShipTargeted")
        .boolean("target_locked")
        .localised("ship")
        .int("scan_stage")
        .localised("pilot_name")
        .text("pilot_rank")
        .float("shield_health")
        .float("hull_health")
        .text("faction")
        .text("legal_status")
        .int("bounty")
        .build()
});

static SHIPYARD: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Shipyard")
        .inherit(&MARKET_BASE)
        .flatten("station", &STATION)
        .text("star_system")
        .boolean("horizons")
        .boolean_key("allow_cobra_mk_iv", "AllowCobraMkIV")
        .entities("price_list", &SHIP_PRICE)
        .build()
});

static SHIPYARD_SWAP: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("ShipyardSwap")
        .inherit(&MARKET_BASE)
        .flatten("ship", &STORED_SHIP)
        .text("store_old_ship")
        .int("store_ship_id")
        .build()
});

static SHIPYARD_TRANSFER: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("ShipyardTransfer")
        .inherit(&MARKET_BASE)
        .flatten("ship", &SHIP_FOR_TRANSFER)
        .float("distance")
        .build()
});

static START_JUMP: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("StartJump")
        .text("jump_type")
        .flatten("system", &SYSTEM)
        .build()
});

static STATISTICS: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Statistics")
        .flatten("statistics", &STATISTICS_DATA)
        .build()
});

static STATUS: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Status")
        .int("flags")
        .field(
            FieldDescriptor::new("pips", FieldKind::Seq)
                .precheck(|v| v.as_array().is_some_and(|a| a.len() == 3))
                .validate(|v| match v {
                    FieldValue::Seq(items) => items.iter().all(|i| i.as_i64().is_some()),
                    _ => false,
                }),
        )
        .int("fire_group")
        .int("gui_focus")
        .map("fuel")
        .float("cargo")
        .text("legal_state")
        .build()
});

static STORED_MODULES: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("StoredModules")
        .inherit(&MARKET_BASE)
        .flatten("station", &STATION)
        .flatten("system", &SYSTEM)
        .entities_key("modules", "Items", &STORED_MODULE)
        .build()
});

static STORED_SHIPS: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("StoredShips")
        .inherit(&MARKET_BASE)
        .text("station_name")
        .text("star_system")
        .entities("ships_here", &STORED_SHIP)
        .entities("ships_remote", &STORED_SHIP)
        .build()
});

static SUPERCRUISE_ENTRY: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("SupercruiseEntry").flatten("system", &SYSTEM).build()
});

static SUPERCRUISE_EXIT: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("SupercruiseExit")
        .flatten("system", &SYSTEM)
        .flatten("body", &BODY)
        .build()
});

static UNDER_ATTACK: LazyLock<Arc<Schema>> =
    LazyLock::new(|| Schema::event("UnderAttack").text("target").build());

static UNDOCKED: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("Undocked")
        .inherit(&MARKET_BASE)
        .flatten("station", &STATION)
        .build()
});

static USS_DROP: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::event("USSDrop")
        .localised_key("type", "USSType")
        .int_key("threat", "USSThreat")
        .build()
});

/// The explicit registration list: wire event name → schema, built once at
/// startup and never mutated afterwards.
pub(crate) fn registered_schemas() -> HashMap<&'static str, Arc<Schema>> {
    let schemas = [
        &FILEHEADER,
        &CONTINUED,
        &SHUTDOWN,
        &APPROACH_BODY,
        &APPROACH_SETTLEMENT,
        &BOUNTY,
        &BUY_AMMO,
        &BUY_TRADE_DATA,
        &CARGO,
        &CODEX_ENTRY,
        &COLLECT_CARGO,
        &COMMANDER,
        &COMMIT_CRIME,
        &CREW_ASSIGN,
        &DIED,
        &DOCKED,
        &DOCKING_DENIED,
        &DOCKING_GRANTED,
        &DOCKING_REQUESTED,
        &ENGINEER_PROGRESS,
        &ESCAPE_INTERDICTION,
        &FSD_JUMP,
        &FSD_TARGET,
        &FSS_ALL_BODIES_FOUND,
        &FSS_DISCOVERY_SCAN,
        &FSS_SIGNAL_DISCOVERED,
        &FUEL_SCOOP,
        &HULL_DAMAGE,
        &INTERDICTED,
        &LEAVE_BODY,
        &LOAD_GAME,
        &LOADOUT,
        &LOCATION,
        &MARKET,
        &MARKET_BUY,
        &MARKET_SELL,
        &MATERIAL_COLLECTED,
        &MATERIALS,
        &MISSION_ABANDONED,
        &MISSION_ACCEPTED,
        &MISSION_COMPLETED,
        &MISSION_REDIRECTED,
        &MISSIONS,
        &MODULE_BUY,
        &MODULE_INFO,
        &MULTI_SELL_EXPLORATION_DATA,
        &MUSIC,
        &NAV_ROUTE,
        &NPC_CREW_PAID_WAGE,
        &OUTFITTING,
        &PROGRESS,
        &PROMOTION,
        &RANK,
        &RECEIVE_TEXT,
        &REDEEM_VOUCHER,
        &REFUEL_ALL,
        &REFUEL_PARTIAL,
        &REPAIR,
        &REPAIR_ALL,
        &REPUTATION,
        &RESERVOIR_REPLENISHED,
        &RESURRECT,
        &SCAN,
        &SCANNED,
        &SELL_EXPLORATION_DATA,
        &SHIP_TARGETED,
        &SHIPYARD,
        &SHIPYARD_SWAP,
        &SHIPYARD_TRANSFER,
        &START_JUMP,
        &STATISTICS,
        &STATUS,
        &STORED_MODULES,
        &STORED_SHIPS,
        &SUPERCRUISE_ENTRY,
        &SUPERCRUISE_EXIT,
        &UNDER_ATTACK,
        &UNDOCKED,
        &USS_DROP,
    ];

    schemas
        .into_iter()
        .map(|schema| {
            let schema: &Arc<Schema> = schema;
            (schema.name(), Arc::clone(schema))
        })
        .collect()
}
