//! Names and short readings for hexagrams 1-64, in King Wen order.

pub(crate) struct HexagramText {
    pub name: &'static str,
    pub reading: &'static str,
}

const fn h(name: &'static str, reading: &'static str) -> HexagramText {
    HexagramText { name, reading }
}

pub(crate) static HEXAGRAM_TEXT: [HexagramText; 64] = [
    h("The Creative", "Sustained, strong action brings sublime success. Persevere in what is right."),
    h("The Receptive", "Yield and follow rather than lead. Devotion and patience bring good fortune."),
    h("Difficulty at the Beginning", "Chaos precedes order. Persist, seek helpers, and do not rush ahead."),
    h("Youthful Folly", "The inexperienced must seek the teacher. Ask sincerely, and ask once."),
    h("Waiting", "Nourishment comes to those who wait with inner certainty. Cross the great water in time."),
    h("Conflict", "Stop halfway rather than push a dispute to the end. Seek a fair mediator."),
    h("The Army", "Discipline and a worthy leader are needed. Organise before you act."),
    h("Holding Together", "Union brings good fortune. Join with others while the moment is open."),
    h("The Taming Power of the Small", "Small restraints shape events. Gentle influence works where force cannot."),
    h("Treading", "Tread carefully on the tail of the tiger. Good manners carry you through danger."),
    h("Peace", "Heaven and earth unite. The small departs, the great approaches."),
    h("Standstill", "Heaven and earth do not meet. Hold to your principles and withdraw quietly."),
    h("Fellowship with Men", "Open fellowship in the light succeeds. Unite on what is shared."),
    h("Possession in Great Measure", "Great abundance comes with modesty. Restrain evil, further the good."),
    h("Modesty", "Modesty carries things through. The humble are raised and the full are emptied."),
    h("Enthusiasm", "Stir others by harmony with their nature. Prepare and then move."),
    h("Following", "Adapt to the demands of the time. Following well brings supreme success."),
    h("Work on What Has Been Spoiled", "Decay can be repaired. Consider carefully before and after the change."),
    h("Approach", "Good fortune draws near. Use the season of growth, knowing it will turn."),
    h("Contemplation", "View the whole before acting. Be seen as you are, sincere and composed."),
    h("Biting Through", "An obstacle must be bitten through. Clear and energetic judgement succeeds."),
    h("Grace", "Beauty adorns but does not decide. Attend to form in small matters only."),
    h("Splitting Apart", "The structure is undermined. Do not act; wait and keep the foundation generous."),
    h("Return", "The turning point arrives. Light returns, and movement comes by itself."),
    h("Innocence", "Act from nature without ulterior design. Unexpected turns follow scheming."),
    h("The Taming Power of the Great", "Hold firm and store your strength. Daily renewal builds character."),
    h("The Corners of the Mouth", "Watch what nourishes you and whom you nourish. Moderation in words and food."),
    h("Preponderance of the Great", "The ridgepole sags under its weight. Act, but act with care and purpose."),
    h("The Abysmal", "Danger repeats itself. Be sincere and keep flowing, like water through a gorge."),
    h("The Clinging", "Clarity depends on what it clings to. Care for what sustains your light."),
    h("Influence", "Mutual attraction brings success. Stay receptive and keep the mind open."),
    h("Duration", "Endurance without blame. Stay the course while staying true to yourself."),
    h("Retreat", "Withdraw before the dark grows. Retreat at the right time is strength."),
    h("The Power of the Great", "Great power must go with what is right. Do not use strength for its own sake."),
    h("Progress", "Rapid, easy advance. Show your bright nature and it will be rewarded."),
    h("Darkening of the Light", "Hide your light in dark times. Perseverance through adversity."),
    h("The Family", "Order within the household orders the world. Words with substance, conduct with duration."),
    h("Opposition", "In small matters good fortune. Find unity within difference."),
    h("Obstruction", "Danger lies ahead. Turn back, seek help, and look inward."),
    h("Deliverance", "Tension dissolves. Forgive mistakes and return to normal quickly."),
    h("Decrease", "Decrease the lower to increase the higher. Simplicity and sincerity suffice."),
    h("Increase", "Gain flows to those below. Undertake something and cross the great water."),
    h("Breakthrough", "Resolve must be proclaimed openly. Do not resort to arms."),
    h("Coming to Meet", "A powerful influence arrives unbidden. Do not give it the upper hand."),
    h("Gathering Together", "People gather around a centre. Make offerings and keep watch."),
    h("Pushing Upward", "Steady effort raises you. Seek the great one and do not fear."),
    h("Oppression", "Exhaustion and restriction. Keep your words few and your spirit unbroken."),
    h("The Well", "The town may change but the well does not. Tend the source that serves all."),
    h("Revolution", "Change is possible when the time is ripe. Conviction makes it trusted."),
    h("The Cauldron", "Nourishment of what is worthy. Transformation through proper form."),
    h("The Arousing", "Thunder comes with a shock. Fear gives way to laughter for the composed."),
    h("Keeping Still", "Rest when it is time to rest. Quiet the back and the mind follows."),
    h("Development", "Gradual progress like a tree on a mountain. Patience brings good fortune."),
    h("The Marrying Maiden", "A subordinate position. Act with tact and see the end in the beginning."),
    h("Abundance", "A time of fullness. Be like the sun at midday, and do not grieve."),
    h("The Wanderer", "The traveller is a guest. Be cautious, modest, and keep moving."),
    h("The Gentle", "Penetrate like the wind. Small, persistent influence succeeds."),
    h("The Joyous", "Joy shared is joy increased. Firmness within, gentleness without."),
    h("Dispersion", "Dissolve what divides. Unite around something greater than the self."),
    h("Limitation", "Limits give shape. Set them, but not so harsh they cannot be kept."),
    h("Inner Truth", "Sincerity reaches even pigs and fishes. Crossing the great water furthers."),
    h("Preponderance of the Small", "Small things may be done, great things should not. Stay low."),
    h("After Completion", "Everything is in place. Guard against the disorder that follows success."),
    h("Before Completion", "The crossing is not yet made. Proceed with care and it will succeed."),
];
