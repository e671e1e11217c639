// Floor generation
pub const ROOMS_PER_FLOOR: usize = 9;
pub const BOSS_FLOOR_INTERVAL: u32 = 10;
pub const MIMIC_ROOM_CHANCE: f64 = 0.05;
pub const MINI_BOSS_BASE_CHANCE: f64 = 0.01;
pub const MINI_BOSS_CHANCE_PER_STEP: f64 = 0.01;
pub const MINI_BOSS_FLOOR_STEP: u32 = 5;
pub const MINI_BOSS_MAX_CHANCE: f64 = 0.08;
pub const RARE_ENEMY_BASE_CHANCE: f64 = 0.15;
pub const RARE_ENEMY_CHANCE_PER_FLOOR: f64 = 0.01;
pub const RARE_ENEMY_MAX_CHANCE: f64 = 0.35;
pub const EMPTY_ROOM_ROLL_THRESHOLD: f64 = 0.85;
pub const LADDER_FORBIDDEN_INDICES: [usize; 3] = [0, 1, 3];
pub const MIN_COMBAT_ROOMS: usize = 5;
pub const MAX_COMBAT_ROOMS: usize = 10;

// Mimic ambush
pub const MIMIC_AMBUSH_HEALTH_FRACTION: f64 = 0.2;

// Attack resolution
pub const MIN_HIT_CHANCE: f64 = 0.05;
pub const MAX_HIT_CHANCE: f64 = 0.98;
pub const UNARMED_MIN_DAMAGE: u32 = 1;
pub const UNARMED_MAX_DAMAGE: u32 = 2;
pub const ARMOR_CURVE_CONSTANT: f64 = 50.0;
pub const MAX_ARMOR_MITIGATION: f64 = 0.9;
pub const MAX_RESISTANCE: f64 = 0.9;
pub const CRIT_CHANCE_PERCENT_CUTOFF: f64 = 1.0;
pub const CRIT_MULTIPLIER_PERCENT_CUTOFF: f64 = 5.0;

// Enemy counter-attack
pub const COUNTER_ATTACK_DELAY_MS: u64 = 800;
pub const COUNTER_ATTACK_SPREAD: u32 = 4;

// Player derived stats
pub const BASE_CRIT_CHANCE_PERCENT: f64 = 5.0;
pub const BASE_CRIT_MULTIPLIER_PERCENT: f64 = 150.0;
pub const STRENGTH_PER_FLAT_DAMAGE: u32 = 5;
pub const DEXTERITY_PER_CRIT_PERCENT: u32 = 10;
pub const DEXTERITY_PER_EVASION_PERCENT: u32 = 8;
pub const MAX_PLAYER_EVASION: f64 = 0.5;
pub const AFFIX_PERCENT_DIVISOR: f64 = 100.0;

// Starting character
pub const STARTING_MAX_HEALTH: u32 = 100;
pub const STARTING_MAX_MANA: u32 = 50;
pub const STARTING_ATTRIBUTE_VALUE: u32 = 5;
pub const STARTING_GOLD: u64 = 0;

// XP and leveling
pub const XP_PER_LEVEL: u64 = 100;
pub const LEVEL_UP_MAX_HEALTH: u32 = 10;
pub const LEVEL_UP_MAX_MANA: u32 = 5;
pub const LEVEL_UP_ATTRIBUTE_POINTS: u32 = 2;

// Zone heat
pub const HEAT_MAX: u32 = 100;
pub const HEAT_GAIN_NORMAL: u32 = 3;
pub const HEAT_GAIN_RARE: u32 = 8;
pub const HEAT_GAIN_ELITE: u32 = 15;
pub const HEAT_GAIN_BOSS: u32 = 30;
pub const HEAT_DECAY_STEP: u32 = 1;
pub const HEAT_DECAY_INTERVAL_SECONDS: u64 = 15;

// Heat shift on the rarity table
pub const HEAT_COMMON_SHIFT: f64 = 0.5;
pub const HEAT_MAGIC_SHIFT: f64 = 0.25;
pub const HEAT_SET_BONUS_CAP: f64 = 0.005;
pub const HEAT_RARE_SHARE: f64 = 0.5;
pub const HEAT_EPIC_SHARE: f64 = 0.3;
pub const HEAT_LEGENDARY_SHARE: f64 = 0.2;

// Rarity tables: cumulative thresholds for Common, Magic, Rare, Epic, Legendary, Set
pub const RARITY_TABLE_NORMAL: [f64; 6] = [0.600, 0.850, 0.950, 0.985, 0.997, 1.0];
pub const RARITY_TABLE_RARE: [f64; 6] = [0.400, 0.700, 0.880, 0.960, 0.990, 1.0];
pub const RARITY_TABLE_ELITE: [f64; 6] = [0.200, 0.500, 0.780, 0.920, 0.980, 1.0];
pub const RARITY_TABLE_BOSS: [f64; 6] = [0.000, 0.150, 0.550, 0.800, 0.950, 1.0];

// Drop policy
pub const DROP_CHANCE_NORMAL: f64 = 0.35;
pub const DROP_CHANCE_RARE: f64 = 0.60;
pub const DROP_CHANCE_ELITE: f64 = 0.85;
pub const BOSS_DROP_ROLLS: usize = 3;
pub const MIMIC_SECOND_ROLL_CHANCE: f64 = 0.40;

// Blueprint category split
pub const WEAPON_CATEGORY_CHANCE: f64 = 0.40;
pub const ARMOR_CATEGORY_CHANCE: f64 = 0.45;

// Item stat scaling
pub const STAT_JITTER_MAX: f64 = 2.0;
pub const WEAPON_MIN_DAMAGE_FACTOR: f64 = 0.75;
pub const WEAPON_MAX_DAMAGE_FACTOR: f64 = 1.25;
pub const VALUE_PER_STAT: f64 = 4.0;
pub const AFFIX_INDEX_STEP: f64 = 0.25;

// Fallback drop
pub const FALLBACK_ITEM_NAME: &str = "Tarnished Trinket";
pub const FALLBACK_ITEM_VALUE: u64 = 1;

// Enemy factory
pub const ENEMY_BASE_HEALTH: u32 = 30;
pub const ENEMY_HEALTH_PER_FLOOR: u32 = 6;
pub const ENEMY_BASE_DAMAGE: u32 = 4;
pub const ENEMY_DAMAGE_PER_FLOOR: u32 = 1;
pub const ENEMY_BASE_XP: u64 = 20;
pub const ENEMY_XP_PER_FLOOR: u64 = 4;
pub const ENEMY_BASE_GOLD: u64 = 5;
pub const ENEMY_GOLD_PER_FLOOR: u64 = 2;
pub const ENEMY_ARMOR_PER_FLOOR: u32 = 2;
pub const ENEMY_STAT_VARIANCE_MIN: f64 = 0.9;
pub const ENEMY_STAT_VARIANCE_MAX: f64 = 1.1;
pub const ENEMY_BASE_EVASION: f64 = 0.05;
/// Fire, cold and lightning resistance on elites and bosses.
pub const ELITE_ELEMENTAL_RESISTANCE: f64 = 0.2;
/// Enemy toughness bonus at full heat (fraction of base stats).
pub const HEAT_ENEMY_TOUGHNESS: f64 = 0.25;

// Rarity multipliers: (health, damage, xp/gold)
pub const RARE_ENEMY_MULTIPLIERS: (f64, f64, f64) = (1.6, 1.3, 2.0);
pub const ELITE_ENEMY_MULTIPLIERS: (f64, f64, f64) = (2.2, 1.5, 3.5);
pub const BOSS_ENEMY_MULTIPLIERS: (f64, f64, f64) = (3.5, 1.8, 8.0);

// Session snapshot
pub const SNAPSHOT_VERSION: u32 = 1;
